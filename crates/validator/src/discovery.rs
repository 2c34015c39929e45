//! Rule file discovery.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::config::ResolvedConfig;

/// A discovered rule file, relative to the scan root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleFile {
    relative: PathBuf,
}

impl RuleFile {
    pub fn new(relative: impl Into<PathBuf>) -> Self {
        Self {
            relative: relative.into(),
        }
    }

    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Absolute location under `root`.
    pub fn absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.relative)
    }
}

impl fmt::Display for RuleFile {
    /// Always uses `/` separators so output is identical across platforms.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative.to_string_lossy().replace('\\', "/"))
    }
}

/// Walk `config.root` and return every rule file, sorted by relative path.
///
/// Excluded directories and hidden entries are pruned without being
/// descended into. Dangling links below the root are skipped with a warning;
/// any other walk error aborts. The walk completes before anything is returned.
pub fn discover(config: &ResolvedConfig) -> Result<Vec<RuleFile>, walkdir::Error> {
    let walker = WalkDir::new(&config.root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_pruned(entry, &config.exclude_dirs));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_dangling(&err) => {
                warn!(
                    path = %err.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    error = %err,
                    "skipping dangling entry"
                );
                continue;
            }
            Err(err) => return Err(err),
        };
        if !entry.file_type().is_file() || !has_rule_extension(entry.path(), &config.extensions) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&config.root)
            .unwrap_or(entry.path())
            .to_path_buf();
        files.push(RuleFile { relative });
    }

    files.sort();
    Ok(files)
}

/// A link whose target no longer exists. The root itself never counts.
fn is_dangling(err: &walkdir::Error) -> bool {
    err.depth() > 0 && err.io_error().map(|e| e.kind()) == Some(std::io::ErrorKind::NotFound)
}

fn is_pruned(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && exclude_dirs.iter().any(|dir| dir == name)
}

fn has_rule_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|ext| ext == e))
        .unwrap_or(false)
}
