//! Gateway configuration
//!
//! Loaded from a TOML file; every field has a serde default so an
//! empty (or absent) file is a valid configuration. The config is
//! assembled once at startup and passed by reference, never looked up
//! through a global registry.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub elastic: ElasticConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Connection settings for the Elasticsearch cluster
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElasticConfig {
    /// Cluster endpoint URL
    #[serde(default = "default_node")]
    pub node: String,

    /// Timeout applied to every backend call, in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Transport-level retries on connection errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_node() -> String {
    "http://localhost:9200".to_string()
}

fn default_request_timeout() -> u64 {
    60_000
}

fn default_max_retries() -> u32 {
    5
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            request_timeout_ms: default_request_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

/// Pagination defaults and ceiling for document searches
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestConfig {
    /// Default result offset
    #[serde(default)]
    pub from: u64,

    /// Default page size
    #[serde(default = "default_size")]
    pub size: u64,

    /// Hard ceiling on caller-requested page size
    #[serde(default = "default_max_size")]
    pub max_size: u64,
}

fn default_size() -> u64 {
    30
}

fn default_max_size() -> u64 {
    1000
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            from: 0,
            size: default_size(),
            max_size: default_max_size(),
        }
    }
}

impl Config {
    /// Load config from file path, or create a default one
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            // Try to save default config
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = config.save(config_path);
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}
