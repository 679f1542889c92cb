//! Path resolution for Lancenotas files.
//!
//! ```text
//! ~/.config/lancenotas/        # Config directory (AppPaths default)
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/lancenotas/   # Data directory
//! ├── professor.json           # Persisted session
//! └── turmas.json              # Persisted roster
//! ```

use std::path::{Path, PathBuf};
use version_migrate::AppPaths;

use lancenotas_core::LancenotasError;

const APP_NAME: &str = "lancenotas";
const CONFIG_FILENAME: &str = "config.toml";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for LancenotasError {
    fn from(e: PathError) -> Self {
        LancenotasError::config(e.to_string())
    }
}

/// Resolves config and data locations, honouring explicit overrides first.
#[derive(Debug, Clone, Default)]
pub struct LancenotasPaths {
    config_file_override: Option<PathBuf>,
    data_dir_override: Option<PathBuf>,
}

impl LancenotasPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file_override = Some(path.into());
        self
    }

    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir_override = Some(path.into());
        self
    }

    fn app_paths() -> AppPaths {
        AppPaths::new(APP_NAME)
    }

    /// Platform config directory (e.g. `~/.config/lancenotas/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Platform data directory (e.g. `~/.local/share/lancenotas/`).
    pub fn default_data_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .data_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        match &self.config_file_override {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(CONFIG_FILENAME)),
        }
    }

    /// Data directory: explicit override, then `configured`, then the platform default.
    pub fn data_dir(&self, configured: Option<&Path>) -> Result<PathBuf, PathError> {
        if let Some(path) = &self.data_dir_override {
            return Ok(path.clone());
        }
        match configured {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_data_dir(),
        }
    }
}
