//! Durable key-value store backed by one JSON file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use lancenotas_core::error::Result;
use lancenotas_core::kv::{KeyValueStore, validate_key};
use tracing::debug;

use super::atomic_toml::{FileLock, write_atomic};

/// Stores each key as `{root}/{key}.json`.
///
/// Writes take an exclusive lock and replace the file atomically. Concurrent
/// processes sharing `root` still race at whole-value granularity: the last
/// writer wins.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    const EXTENSION: &'static str = "json";

    /// Opens (and creates if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, Self::EXTENSION))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        let path = self.value_path(key);

        match fs::read(&path) {
            Ok(bytes) => {
                debug!(key, bytes = bytes.len(), "kv get");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;
        let path = self.value_path(key);

        let _lock = FileLock::acquire(&path)?;
        write_atomic(&path, value)?;
        debug!(key, bytes = value.len(), "kv set");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.value_path(key);

        let _lock = FileLock::acquire(&path)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "kv remove");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_absent_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path()).unwrap();
        assert!(store.get("turmas").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path()).unwrap();

        store.set("turmas", br#"{"version":"1.1.0","turmas":[]}"#).unwrap();
        let value = store.get("turmas").unwrap().unwrap();
        assert_eq!(value, br#"{"version":"1.1.0","turmas":[]}"#);
        assert!(temp_dir.path().join("turmas.json").exists());
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path()).unwrap();

        store.set("professor", b"a much longer first value").unwrap();
        store.set("professor", b"short").unwrap();
        assert_eq!(store.get("professor").unwrap().unwrap(), b"short");
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileKeyValueStore::new(temp_dir.path()).unwrap();
            store.set("professor", b"{}").unwrap();
        }
        let reopened = FileKeyValueStore::new(temp_dir.path()).unwrap();
        assert_eq!(reopened.get("professor").unwrap().unwrap(), b"{}");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path()).unwrap();

        store.set("professor", b"{}").unwrap();
        store.remove("professor").unwrap();
        store.remove("professor").unwrap();
        assert!(store.get("professor").unwrap().is_none());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path()).unwrap();
        store.set("turmas", b"[]").unwrap();

        let mut names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["turmas.json", "turmas.lock"]);
    }

    #[test]
    fn test_concurrent_writers_never_leave_a_mixed_value() {
        let temp_dir = TempDir::new().unwrap();
        let values: Vec<Vec<u8>> = (0..4u8)
            .map(|n| vec![b'a' + n; 4096 * (usize::from(n) + 1)])
            .collect();

        std::thread::scope(|scope| {
            for value in &values {
                let root = temp_dir.path().to_path_buf();
                scope.spawn(move || {
                    // One store per thread, as separate processes would have.
                    let store = FileKeyValueStore::new(root).unwrap();
                    for _ in 0..25 {
                        store.set("turmas", value).unwrap();
                    }
                });
            }
        });

        let store = FileKeyValueStore::new(temp_dir.path()).unwrap();
        let last = store.get("turmas").unwrap().unwrap();
        assert!(values.contains(&last));
        assert!(temp_dir.path().join("turmas.lock").exists());
    }

    #[test]
    fn test_rejects_path_traversal_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("data")).unwrap();

        let err = store.set("../escape", b"x").unwrap_err();
        assert!(err.is_validation());
        assert!(!temp_dir.path().join("escape.json").exists());
    }
}
