//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors raised while reading, checking or writing `config.yml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration has no file path; load it before saving")]
    Unsaved,

    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not create directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File exists but is not valid YAML for the expected fields
    #[error("Invalid configuration in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Could not serialize configuration: {0}")]
    Serialize(String),

    /// Service URL that is not an absolute http(s) URL
    #[error("Invalid {field} '{url}': expected an http or https URL")]
    InvalidUrl { field: &'static str, url: String },

    #[error("Request timeout must be at least one second")]
    InvalidTimeout,
}
