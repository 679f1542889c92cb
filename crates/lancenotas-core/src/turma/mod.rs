//! Turma (class) domain module.
//!
//! # Module Structure
//!
//! - `model`: [`Turma`], [`TurmaDraft`] and the persisted [`Roster`] wrapper
//! - `seed`: the two demo turmas written on first use
//! - `filter`: case-insensitive search over a roster
//! - `id`: timestamp-derived id generation

mod filter;
mod id;
mod model;
mod seed;

pub use filter::filter_turmas;
pub use id::TurmaIdGenerator;
pub use model::{DEFAULT_TRIMESTRE, MSG_NOME_REQUIRED, Roster, Turma, TurmaDraft};
pub use seed::seed_turmas;
