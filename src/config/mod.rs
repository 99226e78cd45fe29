//! Configuration module for catalog-search
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "CATALOG_SETTINGS_PATH";

/// Default locations checked for a settings file, in order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("catalog-search/settings.yml"));
    }
    paths
}

/// Where the active settings were read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Load settings from file or use defaults
///
/// An explicit path must exist. Otherwise `CATALOG_SETTINGS_PATH` and the
/// default locations are tried; when none exists the defaults are used.
/// Environment overrides are applied last in every case. Runs before logging
/// is set up, so the source is returned for the caller to report.
pub fn load(explicit: Option<&Path>) -> Result<(Settings, SettingsSource)> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("Settings file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => find_settings_file(),
    };

    let (mut settings, source) = match path {
        Some(path) => (Settings::from_file(&path)?, SettingsSource::File(path)),
        None => (Settings::default(), SettingsSource::Defaults),
    };

    settings.merge_env();
    Ok((settings, source))
}

fn find_settings_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SETTINGS_PATH_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }
    default_paths().into_iter().find(|path| path.exists())
}
