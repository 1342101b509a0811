//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the list/create/update/delete entry points used by callers.
//! - Emit metadata-only diagnostics for every mutation.
//!
//! # Invariants
//! - Log lines carry ids and counts only, never contact field values.
//! - Repository errors are returned unchanged.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoResult};
use log::{debug, info, warn};

/// Use-case service wrapper for contact CRUD.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every stored contact in storage order.
    pub fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let contacts = self.repo.list_contacts()?;
        debug!(
            "event=contact_list module=service status=ok count={}",
            contacts.len()
        );
        Ok(contacts)
    }

    /// Gets one contact by id.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Persists a new contact and returns it with its assigned id.
    pub fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact> {
        let contact = self.repo.create_contact(draft)?;
        info!(
            "event=contact_create module=service status=ok id={}",
            contact.id
        );
        Ok(contact)
    }

    /// Replaces all editable fields of the contact with `id`.
    pub fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact> {
        match self.repo.update_contact(id, draft) {
            Ok(contact) => {
                info!("event=contact_update module=service status=ok id={id}");
                Ok(contact)
            }
            Err(err) => {
                warn!("event=contact_update module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    /// Removes the contact with `id`.
    pub fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        match self.repo.delete_contact(id) {
            Ok(()) => {
                info!("event=contact_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=contact_delete module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }
}
