//! Turma domain models.

use serde::{Deserialize, Serialize};
use version_migrate::DeriveQueryable as Queryable;

use crate::error::{LancenotasError, Result};

/// Term a new turma starts in.
pub const DEFAULT_TRIMESTRE: u8 = 1;

pub const MSG_NOME_REQUIRED: &str = "Nome da turma é obrigatório";

/// A class taught by the current professor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turma {
    /// Unique within the roster
    pub id: String,
    /// Owning professor. Stored for the record; nothing filters or checks by it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,
    /// Display name, never empty
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disciplina: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ano_serie: Option<String>,
    /// Current term (1..=4)
    pub trimestre_atual: u8,
    pub alunos_count: u32,
    pub atividades_count: u32,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339; the mutation marker
    pub updated_at: String,
}

impl Turma {
    /// True when `query_lower` occurs in the name or the subject.
    ///
    /// `query_lower` must already be lower-cased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.nome.to_lowercase().contains(query_lower)
            || self
                .disciplina
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(query_lower))
    }
}

/// Caller input for creating a turma.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurmaDraft {
    pub nome: String,
    #[serde(default)]
    pub disciplina: Option<String>,
    #[serde(default)]
    pub ano_serie: Option<String>,
    #[serde(default)]
    pub professor_id: Option<String>,
}

impl TurmaDraft {
    pub fn new(nome: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            ..Self::default()
        }
    }

    pub fn with_disciplina(mut self, disciplina: impl Into<String>) -> Self {
        self.disciplina = Some(disciplina.into());
        self
    }

    pub fn with_ano_serie(mut self, ano_serie: impl Into<String>) -> Self {
        self.ano_serie = Some(ano_serie.into());
        self
    }

    pub fn with_professor_id(mut self, professor_id: impl Into<String>) -> Self {
        self.professor_id = Some(professor_id.into());
        self
    }

    /// Checks the draft and returns it with trimmed fields.
    ///
    /// Blank optional labels become `None`.
    pub fn validated(self) -> Result<Self> {
        let nome = self.nome.trim();
        if nome.is_empty() {
            return Err(LancenotasError::validation(MSG_NOME_REQUIRED));
        }

        Ok(Self {
            nome: nome.to_string(),
            disciplina: non_blank(self.disciplina),
            ano_serie: non_blank(self.ano_serie),
            professor_id: non_blank(self.professor_id),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The whole turma collection as persisted under one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Queryable)]
#[queryable(entity = "roster")]
pub struct Roster {
    pub turmas: Vec<Turma>,
}

impl Roster {
    pub fn new(turmas: Vec<Turma>) -> Self {
        Self { turmas }
    }

    pub fn into_turmas(self) -> Vec<Turma> {
        self.turmas
    }
}
