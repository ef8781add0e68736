//! Service configuration for vetai
//!
//! Configuration lives in `<root>/vetai.toml`. Every field is optional; a
//! missing file means defaults. Environment variables override the file.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::bail_invalid;
use crate::compaction::RateLimiter;
use crate::error::{Result, VetaiError};
use crate::store::paths::{CONFIG_FILE, DEFAULT_STORE_DIR};

pub use types::{
    AutoCompactConfig, GraphConfig, RateLimitConfig, ServiceConfig, AUTO_COMPACT_CONFIRMATION,
    CONFIG_FORMAT_VERSION,
};

/// Environment variables read by [`ServiceConfig::apply_env`]
pub const ENV_STORE_DIR: &str = "VETAI_STORE_DIR";
pub const ENV_GRAPH_HOST: &str = "FALKORDB_HOST";
pub const ENV_GRAPH_PORT: &str = "FALKORDB_PORT";
pub const ENV_GRAPH_NAME: &str = "GRAPHITI_GRAPH_NAME";
pub const ENV_API_KEY: &str = "API_KEY";

impl ServiceConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| VetaiError::io_operation("read config", path.display(), e))?;
        let config: ServiceConfig = toml::from_str(&content)?;

        if config.version > CONFIG_FORMAT_VERSION {
            tracing::warn!(
                version = config.version,
                supported = CONFIG_FORMAT_VERSION,
                "Config written by a newer vetai"
            );
        }

        Ok(config)
    }

    /// Load `<root>/vetai.toml`, or defaults when it does not exist
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VetaiError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| VetaiError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    /// Apply environment overrides from the process environment
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(ENV_STORE_DIR) {
            self.store_dir = Some(dir);
        }
        if let Some(host) = get(ENV_GRAPH_HOST) {
            self.graph.host = host;
        }
        if let Some(port) = get(ENV_GRAPH_PORT) {
            self.graph.port = match port.trim().parse() {
                Ok(port) => port,
                Err(_) => bail_invalid!(ENV_GRAPH_PORT, port),
            };
        }
        if let Some(name) = get(ENV_GRAPH_NAME) {
            self.graph.graph_name = name;
        }
        self.graph.api_key_present = get(ENV_API_KEY).is_some();

        Ok(())
    }

    /// Check values that would make the service unusable
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit.max_requests == 0 {
            bail_invalid!("rate_limit.max_requests", "0 (must be at least 1)");
        }
        if self.rate_limit.window_secs == 0 {
            bail_invalid!("rate_limit.window_secs", "0 (must be at least 1)");
        }
        if self.graph.host.trim().is_empty() {
            bail_invalid!("graph.host", "empty");
        }
        Ok(())
    }

    /// Rate limiter configured from `[rate_limit]`
    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(
            Duration::from_secs(self.rate_limit.window_secs),
            self.rate_limit.max_requests,
        )
    }

    /// Store directory; relative paths are resolved against `root`
    pub fn store_path(&self, root: &Path) -> PathBuf {
        match &self.store_dir {
            Some(dir) if Path::new(dir).is_absolute() => PathBuf::from(dir),
            Some(dir) => root.join(dir),
            None => root.join(DEFAULT_STORE_DIR),
        }
    }
}

impl AutoCompactConfig {
    /// True when startup compaction is enabled and explicitly confirmed
    pub fn is_confirmed(&self) -> bool {
        self.enabled && self.confirm.as_deref() == Some(AUTO_COMPACT_CONFIRMATION)
    }
}
