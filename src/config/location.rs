//! Where configuration files live
//!
//! A location is either a file or a directory holding one of the recognized
//! file names. The user's configuration is the first valid location among
//! the standard ones.

use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::APP_NAME;

/// File names recognized inside a configuration directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["config.toml", "rofi-search.toml"];

/// A file or directory that may hold configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    path: PathBuf,
}

impl ConfigLocation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration file this location designates
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the path is neither a file nor a
    /// directory, or `ConfigError::NoConfigInDirectory` if it is a directory
    /// without a recognized file.
    pub fn config_file(&self) -> Result<PathBuf, ConfigError> {
        if self.path.is_file() {
            Ok(self.path.clone())
        } else if self.path.is_dir() {
            self.directory_config()
                .ok_or_else(|| ConfigError::NoConfigInDirectory {
                    path: self.path.clone(),
                })
        } else {
            Err(ConfigError::NotFound {
                path: self.path.clone(),
            })
        }
    }

    /// Whether the location designates a configuration file
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.config_file().is_ok()
    }

    fn directory_config(&self) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.path.join(name))
            .find(|candidate| candidate.is_file())
    }
}

/// Standard locations, in probing order
///
/// `config_dir` is `$XDG_CONFIG_HOME` (or `~/.config`).
#[must_use]
pub fn standard_locations(home: &Path, config_dir: &Path) -> Vec<ConfigLocation> {
    vec![
        ConfigLocation::new(config_dir.join(APP_NAME)),
        ConfigLocation::new(home.join(".config").join(format!("{APP_NAME}.toml"))),
        ConfigLocation::new(home.join(format!(".{APP_NAME}"))),
        ConfigLocation::new(home.join(format!(".{APP_NAME}.toml"))),
    ]
}

/// First valid standard location of the current user
#[must_use]
pub fn user_config() -> Option<ConfigLocation> {
    let home = dirs::home_dir()?;
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
    find_first_valid(standard_locations(&home, &config_dir))
}

fn find_first_valid(locations: Vec<ConfigLocation>) -> Option<ConfigLocation> {
    locations.into_iter().find(|location| {
        let valid = location.is_valid();
        tracing::debug!(path = %location.path.display(), valid, "probing configuration location");
        valid
    })
}

/// Expand a leading `~` and resolve relative paths against `base_dir`
#[must_use]
pub fn expand_path(raw: &str, base_dir: Option<&Path>) -> PathBuf {
    let expanded = if raw == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw))
    } else if let Some(rest) = raw.strip_prefix("~/") {
        dirs::home_dir().map_or_else(|| PathBuf::from(raw), |home| home.join(rest))
    } else {
        PathBuf::from(raw)
    };

    match base_dir {
        Some(base) if expanded.is_relative() => base.join(expanded),
        _ => expanded,
    }
}
