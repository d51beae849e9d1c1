//! mindwell-clinic
//!
//! Domain operations of the clinic. Every operation takes the connection it
//! runs on and, unless it establishes identity itself, the authenticated
//! [`Principal`](mindwell_core::principal::Principal) whose capabilities
//! gate it.

pub mod authz;
pub mod error;
pub mod ops;

pub use authz::authorize;
pub use error::ClinicError;
