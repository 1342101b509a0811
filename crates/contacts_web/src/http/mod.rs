//! HTTP surface: the contact resource, the UI page and the health probe.

pub mod contacts;
pub(crate) mod page;
pub mod payload;
