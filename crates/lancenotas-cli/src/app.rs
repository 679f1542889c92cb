//! Composition root: config, store and services for one CLI invocation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use lancenotas_application::{AccountService, RosterStore, SessionManager};
use lancenotas_core::auth::{CredentialVerifier, UserDirectory};
use lancenotas_core::config::AppConfig;
use lancenotas_core::kv::KeyValueStore;
use lancenotas_infrastructure::{
    ConfigService, FileKeyValueStore, HttpCredentialVerifier, LancenotasPaths,
};

pub struct App {
    config: AppConfig,
    data_dir: PathBuf,
    store: Arc<dyn KeyValueStore>,
}

impl App {
    /// Loads config (file, then env, then flags) and opens the data directory.
    pub fn load(config_file: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut paths = LancenotasPaths::new();
        if let Some(path) = config_file {
            paths = paths.with_config_file(path);
        }
        if let Some(dir) = data_dir {
            paths = paths.with_data_dir(dir);
        }

        let config_service = ConfigService::from_paths(&paths)?;
        let config = config_service
            .load()
            .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

        let data_dir = paths.data_dir(config.client.data_dir.as_deref())?;
        let store = FileKeyValueStore::new(data_dir.clone())
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

        Ok(Self {
            config,
            data_dir,
            store: Arc::new(store),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Verifier used by `login`: the remote endpoint, or the stored accounts offline.
    pub fn verifier(&self, offline: bool) -> Result<Arc<dyn CredentialVerifier>> {
        if offline {
            let directory = self
                .accounts()
                .load_directory()
                .context("Failed to load accounts")?;
            return Ok(Arc::new(directory));
        }
        let verifier = HttpCredentialVerifier::new(
            &self.config.client.api_base_url,
            Duration::from_secs(self.config.client.request_timeout_secs),
        )?;
        Ok(Arc::new(verifier))
    }

    /// A session manager that has already restored the persisted identity.
    pub fn session(&self, verifier: Arc<dyn CredentialVerifier>) -> SessionManager {
        let manager = SessionManager::new(self.store.clone(), verifier);
        manager.restore();
        manager
    }

    /// A session manager for commands that never log in.
    pub fn restored_session(&self) -> SessionManager {
        self.session(Arc::new(UserDirectory::empty()))
    }

    pub fn roster(&self) -> RosterStore {
        RosterStore::new(self.store.clone())
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.store.clone())
    }
}
