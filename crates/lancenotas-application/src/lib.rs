//! Application layer for Lancenotas.
//!
//! Coordinates domain models and infrastructure stores into the two services a
//! client process uses, [`SessionManager`] and [`RosterStore`], plus the
//! [`AccountService`] that manages who can log in.

pub mod account;
pub mod roster;
pub mod session;

pub use account::AccountService;
pub use roster::RosterStore;
pub use session::SessionManager;
