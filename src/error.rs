//! Error types for loading tuning files.

use thiserror::Error;

/// Errors that can occur when loading a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File exists but could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    /// Parsed fine but a value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
