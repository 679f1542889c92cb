//! Turma id generation.

use std::sync::atomic::{AtomicI64, Ordering};

use super::model::Turma;

/// Issues millisecond-timestamp ids that strictly increase within a process.
///
/// Two creates in the same millisecond get consecutive values, and an id already
/// present in the roster is skipped.
#[derive(Debug, Default)]
pub struct TurmaIdGenerator {
    last: AtomicI64,
}

impl TurmaIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an id not used by any turma in `existing`.
    pub fn next_id(&self, existing: &[Turma]) -> String {
        loop {
            let candidate = self.next_value(chrono::Utc::now().timestamp_millis());
            let id = candidate.to_string();
            if !existing.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    fn next_value(&self, now_ms: i64) -> i64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(prev + 1);
            match self
                .last
                .compare_exchange(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turma::seed_turmas;

    #[test]
    fn test_ids_strictly_increase_within_same_millisecond() {
        let generator = TurmaIdGenerator::new();
        let a = generator.next_value(1_000);
        let b = generator.next_value(1_000);
        let c = generator.next_value(999);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_next_id_skips_existing() {
        let generator = TurmaIdGenerator::new();
        let mut turmas = seed_turmas("2024-01-01T00:00:00Z");
        let first = generator.next_id(&turmas);

        turmas[0].id = (first.parse::<i64>().unwrap() + 1).to_string();
        let second = generator.next_id(&turmas);

        assert_ne!(second, turmas[0].id);
        assert!(second.parse::<i64>().unwrap() > first.parse::<i64>().unwrap());
    }
}
