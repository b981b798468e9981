//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rocket_cache::Cache;
use rocket_cart::prelude::{ApiCatalog, CartStore};
use rocket_data::FetchClient;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, searched in order in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["rocket.toml", ".rocket.toml", "rocket.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file and environment.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_path(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Resolved storage file.
    pub fn storage_path(&self) -> PathBuf {
        match &self.config.storage.path {
            Some(path) => expand_home(path),
            None => data_dir().join("rocket").join("storage.json"),
        }
    }

    /// Open the persistent cart storage.
    pub fn open_cache(&self) -> Result<Cache> {
        let path = self.storage_path();
        Cache::open(&path).with_context(|| format!("Failed to open storage: {}", path.display()))
    }

    /// Build the catalog client from `[api]`.
    pub fn catalog(&self) -> Result<ApiCatalog> {
        let client = FetchClient::new(&self.config.api.base_url)
            .with_context(|| format!("Invalid api.base_url: {}", self.config.api.base_url))?
            .with_overrides(self.config.api.policy_overrides());
        Ok(ApiCatalog::new(client))
    }

    /// Open the cart store, reporting failures through the terminal.
    pub fn cart_store(&self) -> Result<CartStore> {
        let cache = self.open_cache()?;
        let catalog = Arc::new(self.catalog()?);
        tracing::debug!(
            config = ?self.config_path,
            storage = %self.storage_path().display(),
            base_url = %self.config.api.base_url,
            "opening cart store"
        );
        Ok(CartStore::new(cache, catalog, Arc::new(self.output.clone())))
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".rocket.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(".rocket.toml")));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("rocket.toml"), "").unwrap();
        std::fs::write(nested.join("rocket.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("rocket.json")));
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(cwd, "rocket.toml"), PathBuf::from("/work/rocket.toml"));
        assert_eq!(resolve_path(cwd, "/etc/rocket.toml"), PathBuf::from("/etc/rocket.toml"));
    }

    #[test]
    fn test_absolute_storage_path_is_kept() {
        let path = Path::new("/var/lib/rocket/storage.json");
        assert_eq!(expand_home(path), path.to_path_buf());
    }
}
