//! Loads [`AppConfig`] from `config.toml` plus `LANCENOTAS_*` overrides.

use std::path::{Path, PathBuf};

use lancenotas_core::config::AppConfig;
use lancenotas_core::error::Result;

use crate::paths::LancenotasPaths;
use crate::storage::AtomicTomlFile;

/// Reads and writes the application config file.
pub struct ConfigService {
    file: AtomicTomlFile<AppConfig>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn from_paths(paths: &LancenotasPaths) -> Result<Self> {
        Ok(Self::new(paths.config_file()?))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// File contents (defaults when the file is missing) without env overrides.
    pub fn load_file(&self) -> Result<AppConfig> {
        let config = self.file.load()?.unwrap_or_default();
        tracing::debug!(path = %self.path().display(), "Loaded config");
        Ok(config)
    }

    /// File contents with process environment overrides applied.
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = self.load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.file.save(config)?;
        Ok(())
    }
}
