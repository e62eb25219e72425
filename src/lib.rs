//! rofi-search - pick a browser and a search engine from a rofi prompt
//!
//! This library holds everything behind the `rofi-search` binary: the
//! registry of browsers and search engines, the layered TOML configuration,
//! the menu state machine driving rofi (or wofi) and the browser launcher.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod entries;
pub mod launcher;
pub mod menu;
pub mod output;
pub mod session;
pub mod system;

#[cfg(test)]
pub mod testing;

/// Name used for configuration directories and files
pub const APP_NAME: &str = "rofi-search";

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    /// A configuration path is missing or holds no configuration file
    WrongConfigPath = 1,
    /// A configuration file could not be parsed or applied
    IncorrectConfig = 2,
    /// The menu program failed or exited with an unexpected status
    MenuError = 3,
}

impl ExitCode {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be located, read or applied
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    /// The menu program could not be run
    #[error("Menu error: {0}")]
    Menu(#[from] menu::MenuError),
    /// The browser could not be started
    #[error("Launch error: {0}")]
    Launch(#[from] launcher::LaunchError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(e) => e.exit_code(),
            Self::Menu(_) | Self::Launch(_) | Self::Io(_) => ExitCode::MenuError,
        }
    }
}
