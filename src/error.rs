//! Error types for feedkeys

use std::io;
use thiserror::Error;

/// Main error type for feedkeys
#[derive(Error, Debug)]
pub enum FeedkeysError {
    #[error("Invalid shortcut: {0}")]
    InvalidShortcut(String),

    #[error("Shortcut \"{sequence}\" overlaps with \"{existing}\"")]
    ShortcutConflict { sequence: String, existing: String },

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Entry service error: {0}")]
    Service(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for feedkeys operations
pub type Result<T> = std::result::Result<T, FeedkeysError>;

impl From<String> for FeedkeysError {
    fn from(s: String) -> Self {
        FeedkeysError::Other(s)
    }
}

impl From<&str> for FeedkeysError {
    fn from(s: &str) -> Self {
        FeedkeysError::Other(s.to_string())
    }
}
