//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config merge conflict on key `{key}`: expected {expected}, found {found}")]
    Merge {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Config validation error: {0}")]
    Validation(String),
}
