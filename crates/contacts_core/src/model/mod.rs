//! Domain model for the contact list.
//!
//! # Invariants
//! - Every stored record is identified by a system-assigned `ContactId`.
//! - Deletion is a hard delete; ids are never handed out twice.

pub mod contact;
