//! Professor domain module.
//!
//! The professor is the only authenticated role. Identities are issued by a
//! [`crate::auth::CredentialVerifier`] and never edited in this crate.

mod model;

pub use model::Professor;
pub(crate) use model::normalize_email;
