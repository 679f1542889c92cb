//! Professor DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema (the identity returned by `/api/login`)

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use lancenotas_core::professor::Professor;

/// Persisted session identity V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ProfessorV1_0_0 {
    pub id: String,
    pub nome: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escola: Option<String>,
    pub created_at: String,
}

/// Type alias for the latest Professor version.
pub type ProfessorDTO = ProfessorV1_0_0;

impl IntoDomain<Professor> for ProfessorV1_0_0 {
    fn into_domain(self) -> Professor {
        Professor {
            id: self.id,
            nome: self.nome,
            email: self.email,
            escola: self.escola,
            created_at: self.created_at,
        }
    }
}

impl FromDomain<Professor> for ProfessorV1_0_0 {
    fn from_domain(professor: Professor) -> Self {
        ProfessorV1_0_0 {
            id: professor.id,
            nome: professor.nome,
            email: professor.email,
            escola: professor.escola,
            created_at: professor.created_at,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the persisted session identity.
pub fn create_professor_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("professor" => [
        ProfessorV1_0_0,
        Professor
    ], save = true)
    .expect("Failed to create professor migrator")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_professor_flat_load() {
        let migrator = create_professor_migrator();
        let value = serde_json::json!({
            "version": "1.0.0",
            "id": "1",
            "nome": "Professor Demo",
            "email": "demo@example.com",
            "escola": "Escola Exemplo",
            "created_at": "2024-01-01T00:00:00Z"
        });

        let professor: Professor = migrator.load_flat_from("professor", value).unwrap();
        assert_eq!(professor.nome, "Professor Demo");
        assert_eq!(professor.escola.as_deref(), Some("Escola Exemplo"));
    }
}
