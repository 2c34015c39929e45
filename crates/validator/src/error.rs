//! Error types for configuration and validation.

use std::path::PathBuf;

use prh_engine::{ApplyError, LoadError};

/// Errors from a validation run.
///
/// Engine errors are transparent: they display exactly as the engine
/// reported them.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Directory traversal failed (unreadable entry, symlink loop, missing root).
    #[error("rule file discovery failed: {0}")]
    Discovery(#[from] walkdir::Error),

    /// A rule file could not be parsed into an engine.
    #[error(transparent)]
    Parse(#[from] LoadError),

    /// An engine could not compute a change set for the target document.
    #[error(transparent)]
    Apply(#[from] ApplyError),

    /// Writing progress output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors loading the validator configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
