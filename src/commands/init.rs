//! Init command - write a commented configuration file for first-time users

use std::fs;
use std::path::{Path, PathBuf};

use crate::APP_NAME;
use crate::config::ConfigError;

/// Commented configuration written by `--make-init-config`
pub const DEFAULT_CONFIG: &str = include_str!("../default.toml");

const CONFIG_FILE: &str = "config.toml";
const BACKUP_EXTENSION: &str = "old.toml";

/// Where the initial configuration goes for a user whose home is `home`
///
/// `~/.config/rofi-search/config.toml` when `~/.config` exists, else
/// `~/.rofi-search/config.toml`.
#[must_use]
pub fn init_config_path(home: &Path) -> PathBuf {
    let config_dir = home.join(".config");
    if config_dir.is_dir() {
        config_dir.join(APP_NAME).join(CONFIG_FILE)
    } else {
        home.join(format!(".{APP_NAME}")).join(CONFIG_FILE)
    }
}

/// Write [`DEFAULT_CONFIG`] to `destination`
///
/// An existing file is first renamed to `config.old.toml`; its new path is
/// returned.
///
/// # Errors
///
/// Returns `ConfigError::Write` if the directory, the backup or the file
/// cannot be written.
pub fn write_init_config(destination: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let write_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ConfigError::Write { path, source }
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(write_error(parent))?;
    }

    let backup = if destination.is_file() {
        let backup = destination.with_extension(BACKUP_EXTENSION);
        fs::rename(destination, &backup).map_err(write_error(&backup))?;
        Some(backup)
    } else {
        None
    };

    fs::write(destination, DEFAULT_CONFIG).map_err(write_error(destination))?;
    Ok(backup)
}

/// Execute the init command
///
/// # Errors
///
/// Returns `ConfigError` if the home directory is unknown or the file
/// cannot be written.
pub fn execute() -> Result<(), ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    let destination = init_config_path(&home);

    if let Some(backup) = write_init_config(&destination)? {
        println!("Backed up previous config file to {}.", backup.display());
    }
    println!("Initial config file created at {}.", destination.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigParser, Configuration};

    #[test]
    fn test_init_path_prefers_xdg() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(
            init_config_path(home.path()),
            home.path().join(".rofi-search/config.toml")
        );

        fs::create_dir(home.path().join(".config")).unwrap();
        assert_eq!(
            init_config_path(home.path()),
            home.path().join(".config/rofi-search/config.toml")
        );
    }

    #[test]
    fn test_write_creates_directory() {
        let home = tempfile::tempdir().unwrap();
        let destination = home.path().join(".rofi-search/config.toml");

        assert_eq!(write_init_config(&destination).unwrap(), None);
        assert_eq!(fs::read_to_string(&destination).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn test_existing_file_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("config.toml");
        fs::write(&destination, "[main]\nlang = \"it\"\n").unwrap();

        let backup = write_init_config(&destination).unwrap().unwrap();
        assert_eq!(backup, dir.path().join("config.old.toml"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "[main]\nlang = \"it\"\n");
        assert_eq!(fs::read_to_string(&destination).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn test_default_config_loads() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("config.toml");
        write_init_config(&destination).unwrap();

        let mut config = Configuration::default();
        assert!(ConfigParser::new(&mut config).load_file(&destination).unwrap());
        assert_eq!(config.customization.width, 50);
        assert!(config.browsers.preferred.is_empty());
    }
}
