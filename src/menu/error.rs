//! Menu error types

use thiserror::Error;

/// Errors that can occur while running the menu program
#[derive(Debug, Error)]
pub enum MenuError {
    /// The menu program could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error while talking to the menu program
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Index selection returned something that is not a candidate index
    #[error("Menu returned '{0}', which is not the index of a candidate")]
    InvalidIndex(String),

    /// A scripted menu ran out of responses
    #[error("No scripted response left for prompt '{0}'")]
    Exhausted(String),
}

/// Result type for menu operations
pub type Result<T> = std::result::Result<T, MenuError>;
