//! Configuration error types
//!
//! Every error here is fatal: a configuration that fails to load aborts the
//! run before any menu opens, so a half-applied filter set never selects the
//! wrong browser.

use std::path::PathBuf;

use thiserror::Error;

use crate::ExitCode;

/// Errors produced while locating, reading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Declared path is neither a file nor a directory
    #[error("'{}' is neither a file nor a directory", path.display())]
    NotFound { path: PathBuf },

    /// Directory holds none of the recognized configuration file names
    #[error("the directory '{}' does not contain any configuration file", path.display())]
    NoConfigInDirectory { path: PathBuf },

    /// Configuration file could not be read
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML
    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A section name holds a plain value instead of a table
    #[error("'{section}' is supposed to be a section, found a {found}")]
    NotASection {
        section: String,
        found: &'static str,
    },

    /// A setting holds a value of the wrong type
    #[error("setting '{section}.{setting}' must be of type '{expected}'")]
    WrongType {
        section: String,
        setting: String,
        expected: &'static str,
    },

    /// A browser name that is not registered
    #[error("[{section}] '{name}' is not the name of a browser")]
    UnknownBrowser { section: String, name: String },

    /// A search engine name that is not registered
    #[error("[{section}] '{name}' is not the name of a search engine")]
    UnknownSearchEngine { section: String, name: String },

    /// Width outside (0, 100]
    #[error("width must be greater than 0% and at most 100%, got {0}%")]
    WidthOutOfRange(i64),

    /// Custom browser or search engine declaration is malformed
    #[error("invalid declaration '{section}.{name}': {reason}")]
    InvalidDeclaration {
        section: String,
        name: String,
        reason: String,
    },

    /// Initial configuration could not be written
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Home directory could not be determined
    #[error("could not determine the home directory")]
    NoHomeDirectory,
}

impl ConfigError {
    pub(crate) fn wrong_type(section: &str, setting: &str, expected: &'static str) -> Self {
        Self::WrongType {
            section: section.to_string(),
            setting: setting.to_string(),
            expected,
        }
    }

    pub(crate) fn unknown_browser(section: &str, name: &str) -> Self {
        Self::UnknownBrowser {
            section: section.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn unknown_search_engine(section: &str, name: &str) -> Self {
        Self::UnknownSearchEngine {
            section: section.to_string(),
            name: name.to_string(),
        }
    }

    /// Whether the error is about where configuration lives, not what it says
    #[must_use]
    pub const fn is_location_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NoConfigInDirectory { .. } | Self::NoHomeDirectory
        )
    }

    /// Process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        if self.is_location_error() {
            ExitCode::WrongConfigPath
        } else {
            ExitCode::IncorrectConfig
        }
    }
}
