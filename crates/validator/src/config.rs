//! Validator configuration loaded from an optional TOML file.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Validator configuration as written by the user.
///
/// Relative paths are resolved by [`ValidatorConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Directory scanned for rule files.
    pub root: PathBuf,
    /// Document every rule file is applied to, relative to `root`.
    pub target_document: PathBuf,
    /// File extensions that mark a rule file (without the leading dot).
    pub extensions: Vec<String>,
    /// Directory names that are never descended into.
    pub exclude_dirs: Vec<String>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_target_document() -> PathBuf {
    PathBuf::from("README.ja.md")
}

fn default_extensions() -> Vec<String> {
    vec!["yml".to_string()]
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            target_document: default_target_document(),
            extensions: default_extensions(),
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

impl ValidatorConfig {
    /// Load config from the given TOML file, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("no config file given, using defaults");
            return Ok(Self::default());
        };

        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve against the base directory: `root` becomes absolute and the
    /// target document is resolved relative to it. `.` components are dropped.
    pub fn resolve(self, base_dir: &Path) -> ResolvedConfig {
        let root = without_cur_dir(&base_dir.join(&self.root));
        let target_document = without_cur_dir(&root.join(&self.target_document));
        let extensions = self
            .extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        ResolvedConfig {
            root,
            target_document,
            extensions,
            exclude_dirs: self.exclude_dirs,
        }
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Configuration with every path resolved, passed to discovery and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub root: PathBuf,
    pub target_document: PathBuf,
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
}
