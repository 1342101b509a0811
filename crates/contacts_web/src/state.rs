//! Shared application state.
//!
//! # Invariants
//! - One SQLite connection is opened at startup and reused by every request.
//! - Storage work runs on the blocking pool, never on the async reactor.
//! - A request that panics while holding the connection does not lock out
//!   later requests; the poisoned guard is taken over as is.

use contacts_core::{ContactService, RepoError, RepoResult, SqliteContactRepository};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

/// Failure of a storage call made on behalf of a request.
#[derive(Debug)]
pub enum StoreCallError {
    Repo(RepoError),
    /// The blocking task was cancelled or panicked.
    Join(String),
}

impl Display for StoreCallError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Join(message) => write!(f, "storage task failed: {message}"),
        }
    }
}

impl Error for StoreCallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Join(_) => None,
        }
    }
}

impl From<RepoError> for StoreCallError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl AppState {
    /// Takes ownership of an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` against a contact service bound to the shared connection.
    pub async fn with_contact_service<T, F>(&self, op: F) -> Result<T, StoreCallError>
    where
        T: Send + 'static,
        F: FnOnce(&ContactService<SqliteContactRepository<'_>>) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            // Repository calls are single autocommit statements.
            let guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            let repo = SqliteContactRepository::try_new(&guard)?;
            let service = ContactService::new(repo);
            op(&service).map_err(StoreCallError::from)
        })
        .await
        .map_err(|err| StoreCallError::Join(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, StoreCallError};
    use contacts_core::db::open_db_in_memory;
    use contacts_core::{ContactDraft, RepoResult};

    #[tokio::test]
    async fn panicking_call_does_not_lock_out_later_calls() {
        let state = AppState::new(open_db_in_memory().expect("open db"));

        let crashed = state
            .with_contact_service(|_| -> RepoResult<()> { panic!("handler bug") })
            .await;
        assert!(matches!(crashed, Err(StoreCallError::Join(_))));

        let created = state
            .with_contact_service(|service| {
                service.create_contact(&ContactDraft::new("Ana", "ana@x.com", "123", None))
            })
            .await
            .expect("create after panic");
        let listed = state
            .with_contact_service(|service| service.list_contacts())
            .await
            .expect("list after panic");
        assert_eq!(listed, vec![created]);
    }
}
