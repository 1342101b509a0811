//! Core use-case services.
//!
//! Keeps the HTTP layer decoupled from storage details.

pub mod contact_service;
