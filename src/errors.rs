//! Error types for engine construction.
//!
//! Analysis itself is total over every input string; only building an engine
//! from custom rule tables or loading configuration can fail.

use thiserror::Error;

/// Errors raised while building rule tables or loading configuration.
#[derive(Debug, Error)]
pub enum ModalityError {
    /// A rule-table regex failed to compile.
    #[error("invalid pattern in {table} table: {pattern:?}: {message}")]
    Pattern {
        table: &'static str,
        pattern: String,
        message: String,
    },

    /// A threshold or factor is out of range or inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// A configuration file could not be read or parsed.
    #[error("failed to load config: {path}: {message}")]
    Parse { path: String, message: String },
}

/// Result type for engine construction.
pub type ModalityResult<T> = Result<T, ModalityError>;
