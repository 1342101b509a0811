#![forbid(unsafe_code)]
//! HTTP front end for the contact list.

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

pub mod config;
pub mod http;
mod middleware;
pub mod state;

pub use config::{ConfigError, DatabaseLocation, ServerConfig};
pub use http::contacts::ContactOperation;
pub use state::{AppState, StoreCallError};

pub const CONTACTS_PATH: &str = "/contacts";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::page::index_handler))
        .route("/healthz", get(http::page::healthz_handler))
        .route(
            CONTACTS_PATH,
            get(http::contacts::list_contacts_handler)
                .post(http::contacts::create_contact_handler)
                .put(http::contacts::update_contact_handler)
                .delete(http::contacts::delete_contact_handler),
        )
        .layer(from_fn(middleware::request_logging_middleware))
        .with_state(state)
}
