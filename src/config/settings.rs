//! Settings structures for catalog-search configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (CATALOG_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("CATALOG_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("CATALOG_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("CATALOG_BASE_URL") {
            self.server.base_url = Some(val);
        }
        if let Some(val) = var("CATALOG_SEARCH_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.search.timeout = Some(timeout);
            }
        }
        if let Some(val) = var("CATALOG_LIBRARY_PATH") {
            self.library.path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("CATALOG_LOG_LEVEL") {
            self.log.level = val;
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Public base URL used to build image links
    pub base_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 4533,
            bind_address: "127.0.0.1".to_string(),
            base_url: None,
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Deadline for one search in seconds; none waits for every lookup
    pub timeout: Option<f64>,
    /// Count used when a request omits a category count
    pub default_count: usize,
    /// Upper bound for any requested count
    pub max_count: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            timeout: Some(5.0),
            default_count: 20,
            max_count: 500,
        }
    }
}

impl SearchSettings {
    /// Configured deadline, ignoring non-positive values
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
            .filter(|t| t.is_finite() && *t > 0.0)
            .map(Duration::from_secs_f64)
    }
}

/// Catalog source settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// YAML catalog file; none serves an empty library
    pub path: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive used when RUST_LOG is unset
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
