//! Turma collection persistence.

mod store;

pub use store::RosterStore;
