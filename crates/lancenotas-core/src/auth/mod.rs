//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `wire`: JSON request/response shapes of `/api/login` and `/api/logout`
//! - `verifier`: the [`CredentialVerifier`] capability
//! - `account`: a professor plus a password hash ([`Account`])
//! - `password`: Argon2 hashing
//! - `directory`: the credential table ([`UserDirectory`])

mod account;
mod directory;
mod password;
mod verifier;
mod wire;

pub use account::{Account, AccountList, NewProfessor};
pub use directory::{DEMO_EMAIL, DEMO_PASSWORD, MSG_DUPLICATE_EMAIL, UserDirectory};
pub use password::{hash_password, verify_password};
pub use verifier::CredentialVerifier;
pub use wire::{
    AuthResponse, LoginRequest, MSG_INVALID_CREDENTIALS, MSG_LOGIN_OK, MSG_LOGOUT_OK,
    MSG_MISSING_FIELDS,
};
