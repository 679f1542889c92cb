//! Data Transfer Objects (DTOs) for persisted values.
//!
//! These DTOs are the versioned schema of what the key-value store holds. They
//! are private to the infrastructure layer; services see only domain models.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible additions (new optional fields)
//!
//! ### Roster Version History
//! - **1.0.0**: Browser-era turma list
//! - **1.1.0**: Added `professor_id` and `trimestre_atual`
//!
//! ### Professor Version History
//! - **1.0.0**: Initial schema
//!
//! ### Accounts Version History
//! - **1.0.0**: Initial schema (Argon2 password hashes)

mod accounts;
mod professor;
mod roster;

pub use accounts::{AccountV1_0_0, AccountsDTO, AccountsV1_0_0, create_accounts_migrator};
pub use professor::{ProfessorDTO, ProfessorV1_0_0, create_professor_migrator};
pub use roster::{
    RosterDTO, RosterV1_0_0, RosterV1_1_0, TurmaV1_0_0, TurmaV1_1_0, create_roster_migrator,
};
