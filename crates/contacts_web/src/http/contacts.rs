//! Handlers of the `/contacts` resource.
//!
//! Every failure, whatever its cause, is answered with status 200 and a
//! fixed per-operation `{"error": ...}` body. The cause is only logged.

use super::payload::{parse_create, parse_delete, parse_update};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::warn;
use serde_json::json;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOperation {
    List,
    Create,
    Update,
    Delete,
}

impl ContactOperation {
    pub fn label(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Message returned to clients for any failure of this operation.
    pub fn error_message(self) -> &'static str {
        match self {
            Self::List => "Erro ao obter contatos",
            Self::Create => "Erro ao criar contato",
            Self::Update => "Erro ao atualizar contato",
            Self::Delete => "Erro ao deletar contato",
        }
    }
}

fn failure(operation: ContactOperation, cause: &dyn Display) -> Response {
    warn!(
        "event=contact_request module=http op={} status=error error={}",
        operation.label(),
        cause
    );
    Json(json!({ "error": operation.error_message() })).into_response()
}

pub(crate) async fn list_contacts_handler(State(state): State<AppState>) -> Response {
    match state
        .with_contact_service(|service| service.list_contacts())
        .await
    {
        Ok(contacts) => Json(contacts).into_response(),
        Err(err) => failure(ContactOperation::List, &err),
    }
}

pub(crate) async fn create_contact_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let draft = match parse_create(&body) {
        Ok(draft) => draft,
        Err(err) => return failure(ContactOperation::Create, &err),
    };

    match state
        .with_contact_service(move |service| service.create_contact(&draft))
        .await
    {
        Ok(contact) => Json(contact).into_response(),
        Err(err) => failure(ContactOperation::Create, &err),
    }
}

pub(crate) async fn update_contact_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let (id, draft) = match parse_update(&body) {
        Ok(parsed) => parsed,
        Err(err) => return failure(ContactOperation::Update, &err),
    };

    match state
        .with_contact_service(move |service| service.update_contact(id, &draft))
        .await
    {
        Ok(contact) => Json(contact).into_response(),
        Err(err) => failure(ContactOperation::Update, &err),
    }
}

pub(crate) async fn delete_contact_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let id = match parse_delete(&body) {
        Ok(id) => id,
        Err(err) => return failure(ContactOperation::Delete, &err),
    };

    match state
        .with_contact_service(move |service| service.delete_contact(id))
        .await
    {
        Ok(()) => Json(json!({ "status": true })).into_response(),
        Err(err) => failure(ContactOperation::Delete, &err),
    }
}
