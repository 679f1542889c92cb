//! Key-value persistence capability.
//!
//! Both the session and the roster are stored as whole values under fixed keys.
//! Implementations live in `lancenotas-infrastructure`.

use crate::error::{LancenotasError, Result};

/// Key holding the serialized logged-in professor.
pub const SESSION_KEY: &str = "professor";

/// Key holding the serialized turma collection.
pub const ROSTER_KEY: &str = "turmas";

/// Key holding the login accounts served by `/api/login`.
pub const ACCOUNTS_KEY: &str = "accounts";

/// A synchronous, process-local byte store that survives restarts.
///
/// `set` replaces the whole value; readers never observe a partial write.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Deletes `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Rejects keys that cannot be used as a single file name.
///
/// Allowed: non-empty ASCII alphanumerics plus `_`, `-` and `.`, not starting
/// with a dot.
pub fn validate_key(key: &str) -> Result<()> {
    let well_formed = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if well_formed {
        Ok(())
    } else {
        Err(LancenotasError::validation(format!(
            "invalid store key '{}'",
            key
        )))
    }
}
