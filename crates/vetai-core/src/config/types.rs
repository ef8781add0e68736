//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Current config format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Value `auto_compact.confirm` must hold before startup compaction runs
pub const AUTO_COMPACT_CONFIRMATION: &str = "DELETE_DUPLICATES";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Config format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Record store directory (optional; relative paths are taken from the root)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<String>,

    /// Limits on destructive compaction requests
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Compaction run at startup
    #[serde(default)]
    pub auto_compact: AutoCompactConfig,

    /// Knowledge-graph backend location
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Sliding-window limit on destructive requests per client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
}

/// Startup compaction; destructive, so it needs an explicit confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoCompactConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Must equal `DELETE_DUPLICATES`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<String>,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default = "default_backup")]
    pub backup: bool,
}

/// Knowledge-graph backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_graph_host")]
    pub host: String,

    #[serde(default = "default_graph_port")]
    pub port: u16,

    #[serde(default = "default_graph_name")]
    pub graph_name: String,

    /// Whether an API key for the language model was found in the environment
    #[serde(skip)]
    pub api_key_present: bool,
}

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_requests() -> usize {
    3
}

fn default_backup() -> bool {
    true
}

fn default_graph_host() -> String {
    "localhost".to_string()
}

fn default_graph_port() -> u16 {
    6379
}

fn default_graph_name() -> String {
    "vetai_knowledge".to_string()
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

impl Default for AutoCompactConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            confirm: None,
            dry_run: false,
            backup: default_backup(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            host: default_graph_host(),
            port: default_graph_port(),
            graph_name: default_graph_name(),
            api_key_present: false,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            store_dir: None,
            rate_limit: RateLimitConfig::default(),
            auto_compact: AutoCompactConfig::default(),
            graph: GraphConfig::default(),
        }
    }
}
