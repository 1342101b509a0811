//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/create/update/delete over the `contacts` table.
//! - Hand back full records, including the storage-assigned id.
//!
//! # Invariants
//! - Update replaces all editable columns; there is no partial update.
//! - Update and delete of an unknown id fail with `NotFound` and change nothing.
//! - A repository is only built over a connection migrated to the latest
//!   schema version.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::contact::{Contact, ContactDraft, ContactId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    phone,
    company
FROM contacts";

const CONTACTS_TABLE: &str = "contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ContactId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD.
pub trait ContactRepository {
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact>;
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository borrowing an open connection.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection after checking that it carries the contact schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when the `contacts` table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [CONTACTS_TABLE],
            |row| row.get(0),
        )?;
        if !has_table {
            return Err(RepoError::MissingRequiredTable(CONTACTS_TABLE));
        }

        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                &format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_contact_row,
            )
            .optional()?;
        Ok(contact)
    }

    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact> {
        self.conn.execute(
            "INSERT INTO contacts (name, email, phone, company) VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.phone.as_str(),
                draft.company.as_deref(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        Ok(draft.clone().into_contact(id))
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact> {
        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                email = ?2,
                phone = ?3,
                company = ?4
             WHERE id = ?5;",
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.phone.as_str(),
                draft.company.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(draft.clone().into_contact(id))
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        company: row.get("company")?,
    })
}
