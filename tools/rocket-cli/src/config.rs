//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rocket_data::PolicyOverrides;
use serde::{Deserialize, Serialize};

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "ROCKET_API_URL";
/// Overrides `storage.path`.
pub const ENV_STORAGE_PATH: &str = "ROCKET_STORAGE_PATH";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cart storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Apply environment overrides, reading variables through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(path) = var(ENV_STORAGE_PATH).filter(|v| !v.is_empty()) {
            self.storage.path = Some(PathBuf::from(path));
        }
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `products/{id}` and `stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds. Unset uses per-endpoint defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Retries after the first attempt. Unset uses per-endpoint defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
            max_retries: None,
        }
    }
}

impl ApiConfig {
    /// Overrides for the per-endpoint fetch defaults. Unset fields keep them.
    pub fn policy_overrides(&self) -> PolicyOverrides {
        PolicyOverrides {
            timeout: self.timeout_ms.map(Duration::from_millis),
            max_retries: self.max_retries,
        }
    }
}

/// Cart storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file. A leading `~/` expands to the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Level for `rocket*` targets when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
        }
    }
}

/// Generate a default rocket.toml config file.
pub fn generate_default_config() -> String {
    r#"# RocketShoes cart configuration

[api]
base_url = "http://localhost:3333"
# timeout_ms = 3000
# max_retries = 1

[storage]
# path = "~/.local/share/rocket/storage.json"

[log]
format = "human"
level = "info"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert!(config.storage.path.is_none());
        assert_eq!(config.log.format, LogFormat::Human);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.api.policy_overrides(), PolicyOverrides::default());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            timeout_ms = 1500
            max_retries = 2

            [log]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.log.format, LogFormat::Json);

        let overrides = config.api.policy_overrides();
        assert_eq!(overrides.timeout, Some(Duration::from_millis(1500)));
        assert_eq!(overrides.max_retries, Some(2));
    }

    #[test]
    fn test_timeout_alone_keeps_inventory_retry() {
        let config: CliConfig = toml::from_str("[api]\ntimeout_ms = 800\n").unwrap();

        let policy = config
            .api
            .policy_overrides()
            .apply(rocket_data::DependencyTag::Inventory);

        assert_eq!(policy.timeout.total, Duration::from_millis(800));
        assert_eq!(policy.retry.max_retries, 1);
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rocket.json");
        std::fs::write(&path, r#"{"storage":{"path":"/tmp/cart.json"}}"#).unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/cart.json")));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rocket.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://api.rocketshoes.dev"),
            (ENV_STORAGE_PATH, "/var/lib/rocket/cart.json"),
        ]
        .into();

        let mut config = CliConfig::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://api.rocketshoes.dev");
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/var/lib/rocket/cart.json"))
        );
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let mut config = CliConfig::default();
        config.apply_env(|_| Some(String::new()));
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert!(config.storage.path.is_none());
    }
}
