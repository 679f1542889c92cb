//! Domain layer of Lancenotas.
//!
//! Holds the models shared by every crate (professor, session, turma), the
//! capability traits the services are written against ([`kv::KeyValueStore`],
//! [`auth::CredentialVerifier`]) and the error taxonomy.

pub mod auth;
pub mod config;
pub mod error;
pub mod kv;
pub mod professor;
pub mod session;
pub mod turma;

pub use error::{AuthFailure, LancenotasError, Result};
