//! mindwell-core
//!
//! Pure domain types, identifier conventions, and field validation.
//! No database or HTTP dependency. This is the shared vocabulary of the
//! Mindwell clinic backend.

pub mod codes;
pub mod error;
pub mod models;
pub mod principal;
pub mod query;
pub mod validate;
