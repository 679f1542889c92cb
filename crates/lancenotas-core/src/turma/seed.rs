//! Demo turmas written the first time a roster is opened.

use super::model::{DEFAULT_TRIMESTRE, Turma};

/// Returns the two demo turmas, both stamped with `now`.
pub fn seed_turmas(now: &str) -> Vec<Turma> {
    vec![
        Turma {
            id: "1".to_string(),
            professor_id: None,
            nome: "7º A - Matemática".to_string(),
            disciplina: Some("Matemática".to_string()),
            ano_serie: Some("7º Ano".to_string()),
            trimestre_atual: DEFAULT_TRIMESTRE,
            alunos_count: 28,
            atividades_count: 5,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        },
        Turma {
            id: "2".to_string(),
            professor_id: None,
            nome: "8º B - Português".to_string(),
            disciplina: Some("Português".to_string()),
            ano_serie: Some("8º Ano".to_string()),
            trimestre_atual: DEFAULT_TRIMESTRE,
            alunos_count: 25,
            atividades_count: 3,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        },
    ]
}
