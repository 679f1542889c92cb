//! Roster search.

use super::model::Turma;

/// Returns the turmas whose name or subject contains `query`, ignoring case.
///
/// Order is preserved. An empty query returns the whole collection.
pub fn filter_turmas(query: &str, turmas: &[Turma]) -> Vec<Turma> {
    if query.is_empty() {
        return turmas.to_vec();
    }

    let query_lower = query.to_lowercase();
    turmas
        .iter()
        .filter(|t| t.matches(&query_lower))
        .cloned()
        .collect()
}
