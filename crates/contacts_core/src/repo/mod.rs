//! Repository layer for contact persistence.
//!
//! # Responsibility
//! - Define the data access contract used by the service layer.
//! - Keep SQL details out of service and HTTP code.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod contact_repo;
