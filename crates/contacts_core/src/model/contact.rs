//! Contact domain model.
//!
//! # Responsibility
//! - Define the persisted `Contact` record and its editable `ContactDraft`.
//!
//! # Invariants
//! - `id` is assigned by storage on create and never changes afterwards.
//! - `name`, `email` and `phone` are always present; `company` may be absent.
//! - No content rules beyond presence: empty strings and any email shape are
//!   accepted.

use serde::{Deserialize, Serialize};

/// Storage-assigned identifier of a contact.
pub type ContactId = i64;

/// A persisted contact as returned by every read and write path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Serialized as `null` when absent.
    pub company: Option<String>,
}

/// Editable fields of a contact.
///
/// Create and update both take a full draft; update replaces every field,
/// so a draft without `company` clears the stored company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        company: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            company,
        }
    }

    /// Binds this draft to a storage id.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
        }
    }
}

impl Contact {
    /// Returns the editable part of this contact.
    pub fn draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactDraft};

    #[test]
    fn draft_deserializes_without_company() {
        let draft: ContactDraft =
            serde_json::from_str(r#"{"name":"Ana","email":"ana@x.com","phone":"123"}"#)
                .expect("draft without company should parse");
        assert_eq!(draft.company, None);
    }

    #[test]
    fn draft_rejects_missing_required_field() {
        let err = serde_json::from_str::<ContactDraft>(r#"{"name":"Ana","phone":"123"}"#)
            .expect_err("missing email must be rejected");
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn contact_serializes_absent_company_as_null() {
        let contact = ContactDraft::new("Ana", "ana@x.com", "123", None).into_contact(7);
        let value = serde_json::to_value(&contact).expect("contact should serialize");
        assert_eq!(value["id"], 7);
        assert!(value["company"].is_null());
    }

    #[test]
    fn draft_of_contact_drops_only_the_id() {
        let contact = Contact {
            id: 3,
            name: "Bia".to_string(),
            email: "bia@x.com".to_string(),
            phone: "456".to_string(),
            company: Some("Acme".to_string()),
        };
        assert_eq!(contact.draft().into_contact(3), contact);
    }
}
