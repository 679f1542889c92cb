//! Session domain module.
//!
//! - `model`: the process-wide [`Session`] value (at most one authenticated professor)
//!
//! The manager that drives login, logout and restore lives in
//! `lancenotas-application`.

mod model;

pub use model::Session;
