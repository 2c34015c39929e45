//! Core [`Engine`] struct: a loaded rule set that computes change sets.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::changeset::ChangeSet;
use crate::rule::Rule;

use super::error::{ApplyError, LoadError, Result};
use super::imports::{collect_rules, parse_rule_file, read_rule_file};

/// Placeholder file name used for rule sets parsed from a string.
const INLINE_SOURCE: &str = "<inline>";

/// A compiled set of rules loaded from one rule file and its imports.
#[derive(Debug, Clone)]
pub struct Engine {
    source: Option<PathBuf>,
    rules: Vec<Rule>,
}

impl Engine {
    /// Load a rule file, resolve its imports, compile every rule, and run
    /// every rule's specs.
    pub fn from_yaml_file_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = read_rule_file(path)?;
        let canonical = fs::canonicalize(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut chain = vec![canonical];
        let rules = collect_rules(&file, path, &mut chain, true)?;

        debug!(path = %path.display(), rules = rules.len(), "loaded rule file");
        Ok(Self {
            source: Some(path.to_path_buf()),
            rules,
        })
    }

    /// Build an engine from YAML text. Imports resolve relative to `base_dir`.
    pub fn from_yaml_str(yaml: &str, base_dir: &Path) -> Result<Self> {
        let origin = base_dir.join(INLINE_SOURCE);
        let file = parse_rule_file(yaml, &origin)?;
        let rules = collect_rules(&file, &origin, &mut Vec::new(), true)?;
        Ok(Self { source: None, rules })
    }

    /// The rule file this engine was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Read a document and compute its change set.
    pub fn make_change_set(&self, document: impl AsRef<Path>) -> std::result::Result<ChangeSet, ApplyError> {
        let path = document.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ApplyError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let changes = self.make_change_set_for(&content);
        debug!(document = %path.display(), diffs = changes.len(), "computed change set");
        Ok(changes)
    }

    /// Compute the change set for in-memory text.
    pub fn make_change_set_for(&self, content: &str) -> ChangeSet {
        let mut diffs = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            rule.find_diffs(index, content, &mut diffs);
        }
        ChangeSet::from_diffs(diffs)
    }

    /// Return `content` with every change applied in a single pass.
    pub fn replace_by_rule(&self, content: &str) -> String {
        self.make_change_set_for(content).apply(content)
    }
}
