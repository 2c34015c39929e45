//! Error types for rule loading and change-set computation.

use std::path::PathBuf;

use crate::rule::RuleError;

/// A rule file could not be turned into an engine.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Filesystem I/O error while reading a rule file.
    #[error("failed to read rule file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse/deserialization error.
    #[error("failed to parse rule file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported rule file version {version} in {path}")]
    UnsupportedVersion { path: PathBuf, version: u32 },

    /// A rule failed to compile or one of its specs did not hold.
    #[error("rules[{index}] (`{expected}`) in {path}: {source}")]
    Rule {
        path: PathBuf,
        index: usize,
        expected: String,
        #[source]
        source: RuleError,
    },

    #[error("circular import of {path}")]
    ImportCycle { path: PathBuf },

    #[error("import chain exceeds maximum depth ({max}) at {path}")]
    ImportTooDeep { path: PathBuf, max: usize },
}

/// The engine could not compute a change set for a document.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("failed to read document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
