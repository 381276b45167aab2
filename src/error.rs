//! Error types of the crate.

use std::path::PathBuf;

/// Errors of the checked board operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
pub enum GameboardError {
    /// Column index is outside of the board.
    #[error("column {0} does not exist")]
    InvalidColumn(usize),
    /// Column is full.
    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors that can abort a search.
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
pub enum SearchError {
    #[error("search was cancelled")]
    Cancelled,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
