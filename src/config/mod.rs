mod types;

pub use types::*;

use crate::Result;
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "GEMINI_KEY";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`) and applies
/// environment overrides.
pub async fn load() -> Result<Config> {
    load_with(|name| env::var(name).ok(), Path::new(DEFAULT_CONFIG_PATH)).await
}

/// Like [`load`], reading variables through `lookup` and falling back to
/// `default_path` when `CONFIG_PATH` is unset.
///
/// A missing default file falls back to built-in defaults; a missing file
/// named explicitly through `CONFIG_PATH` is an error.
pub async fn load_with<F>(lookup: F, default_path: &Path) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(CONFIG_PATH_ENV) {
        Some(path) => load_from(&path).await?,
        None if default_path.exists() => load_from(&default_path.to_string_lossy()).await?,
        None => {
            debug!("No {} found, using defaults", default_path.display());
            Config::default()
        }
    };

    config.apply_env_overrides(lookup);

    Ok(config)
}

pub async fn load_from(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not an empty mapping.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

impl Config {
    /// Overlays values from the environment, read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.upstream.api_key = Some(key);
        }
    }
}
