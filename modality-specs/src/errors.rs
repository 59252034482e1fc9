//! Error types for the fixture harness.

use thiserror::Error;

/// Errors raised while loading or validating fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A fixture file is not valid TOML or breaks a fixture rule.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A fixture file or directory could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// The fixture run produced regressions.
    #[error("assertion failed: {message}")]
    Assertion { message: String },
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;
