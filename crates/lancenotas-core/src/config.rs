//! Application configuration model.
//!
//! Loaded from `config.toml` by `lancenotas-infrastructure`; every field has a
//! default so a missing file or section is never an error.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_BIND_ADDR: &str = "LANCENOTAS_BIND_ADDR";
pub const ENV_API_URL: &str = "LANCENOTAS_API_URL";
pub const ENV_DATA_DIR: &str = "LANCENOTAS_DATA_DIR";
pub const ENV_LOG: &str = "LANCENOTAS_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub client: ClientSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the login endpoint listens on
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the login endpoint
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Where the client keeps its session and roster; platform data dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_secs: 10,
            data_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Applies `LANCENOTAS_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.server.bind_addr = addr;
        }
        if let Some(url) = lookup(ENV_API_URL) {
            self.client.api_base_url = url;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.client.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[client]
api_base_url = "http://notas.local:9000"
"#,
        )
        .unwrap();

        assert_eq!(config.client.api_base_url, "http://notas.local:9000");
        assert_eq!(config.client.request_timeout_secs, 10);
        assert_eq!(config.server, ServerSettings::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BIND_ADDR, "0.0.0.0:3000"),
            (ENV_DATA_DIR, "/tmp/lancenotas"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.client.data_dir, Some(PathBuf::from("/tmp/lancenotas")));
        assert_eq!(config.client.api_base_url, ClientSettings::default().api_base_url);
    }
}
