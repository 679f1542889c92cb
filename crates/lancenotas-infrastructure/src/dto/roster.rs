//! Roster DTOs and migrations
//!
//! The whole turma collection is one persisted value.
//!
//! ## Version History
//! - **1.0.0**: Browser-era shape (no owner, no current term)
//! - **1.1.0**: Added `professor_id` and `trimestre_atual` per turma

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use lancenotas_core::turma::{DEFAULT_TRIMESTRE, Roster, Turma};

// ============================================================================
// Turma DTOs
// ============================================================================

/// Turma entry V1.0.0
///
/// Ids are timestamp strings; a bare JSON number is accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurmaV1_0_0 {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub nome: String,
    #[serde(default)]
    pub disciplina: Option<String>,
    #[serde(default)]
    pub ano_serie: Option<String>,
    #[serde(default)]
    pub alunos_count: u32,
    #[serde(default)]
    pub atividades_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Turma entry V1.1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurmaV1_1_0 {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disciplina: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ano_serie: Option<String>,
    #[serde(default = "default_trimestre")]
    pub trimestre_atual: u8,
    #[serde(default)]
    pub alunos_count: u32,
    #[serde(default)]
    pub atividades_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

fn default_trimestre() -> u8 {
    DEFAULT_TRIMESTRE
}

/// The browser UI wrote `""` for labels the form left empty.
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TurmaV1_0_0> for TurmaV1_1_0 {
    fn from(old: TurmaV1_0_0) -> Self {
        TurmaV1_1_0 {
            id: old.id,
            professor_id: None,
            nome: old.nome,
            disciplina: blank_to_none(old.disciplina),
            ano_serie: blank_to_none(old.ano_serie),
            trimestre_atual: DEFAULT_TRIMESTRE,
            alunos_count: old.alunos_count,
            atividades_count: old.atividades_count,
            created_at: old.created_at,
            updated_at: old.updated_at,
        }
    }
}

impl From<TurmaV1_1_0> for Turma {
    fn from(dto: TurmaV1_1_0) -> Self {
        Turma {
            id: dto.id,
            professor_id: dto.professor_id,
            nome: dto.nome,
            disciplina: dto.disciplina,
            ano_serie: dto.ano_serie,
            trimestre_atual: dto.trimestre_atual,
            alunos_count: dto.alunos_count,
            atividades_count: dto.atividades_count,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

impl From<Turma> for TurmaV1_1_0 {
    fn from(turma: Turma) -> Self {
        TurmaV1_1_0 {
            id: turma.id,
            professor_id: turma.professor_id,
            nome: turma.nome,
            disciplina: turma.disciplina,
            ano_serie: turma.ano_serie,
            trimestre_atual: turma.trimestre_atual,
            alunos_count: turma.alunos_count,
            atividades_count: turma.atividades_count,
            created_at: turma.created_at,
            updated_at: turma.updated_at,
        }
    }
}

// ============================================================================
// Roster DTOs
// ============================================================================

/// Roster V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct RosterV1_0_0 {
    pub turmas: Vec<TurmaV1_0_0>,
}

/// Roster V1.1.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct RosterV1_1_0 {
    pub turmas: Vec<TurmaV1_1_0>,
}

/// Type alias for the latest Roster version.
pub type RosterDTO = RosterV1_1_0;

/// Migration from RosterV1_0_0 to RosterV1_1_0.
/// Existing turmas get no owner and start in the first term.
impl MigratesTo<RosterV1_1_0> for RosterV1_0_0 {
    fn migrate(self) -> RosterV1_1_0 {
        RosterV1_1_0 {
            turmas: self.turmas.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoDomain<Roster> for RosterV1_1_0 {
    fn into_domain(self) -> Roster {
        Roster::new(self.turmas.into_iter().map(Into::into).collect())
    }
}

impl FromDomain<Roster> for RosterV1_1_0 {
    fn from_domain(roster: Roster) -> Self {
        RosterV1_1_0 {
            turmas: roster.into_turmas().into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for the roster.
///
/// # Migration Path
///
/// - V1.0 → V1.1: Adds `professor_id` (None) and `trimestre_atual` (1)
/// - V1.1 → Roster: Converts DTO to domain model
pub fn create_roster_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let roster_path = version_migrate::Migrator::define("roster")
        .from::<RosterV1_0_0>()
        .step::<RosterV1_1_0>()
        .into_with_save::<Roster>();

    migrator
        .register(roster_path)
        .expect("Failed to register roster migration path");

    migrator
}
