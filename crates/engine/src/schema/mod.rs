//! Serde types mirroring the on-disk rule file layout.
//!
//! These are the raw, uncompiled shapes. [`crate::rule::Rule`] turns a
//! [`RawRule`] into something that can be matched against text.

use serde::Deserialize;

#[cfg(test)]
mod tests;

/// The only rule file format version understood by this crate.
pub const SUPPORTED_VERSION: u32 = 1;

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

/// Top-level contents of a rule file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFile {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Other rule files whose rules are merged in before this file's own.
    #[serde(default)]
    pub imports: Vec<ImportEntry>,
    #[serde(default)]
    pub rules: Vec<RawRule>,
}

/// One entry of the `imports` list: either a bare path or a detailed form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImportEntry {
    Path(String),
    Detailed(ImportOptions),
}

/// Detailed import with options controlling what gets merged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Path relative to the importing file's directory.
    pub path: String,
    /// Do not follow the imports of the imported file.
    #[serde(default)]
    pub disable_imports: bool,
    /// Drop imported rules whose `expected` or any pattern equals one of these.
    #[serde(default)]
    pub ignore_rules: Vec<String>,
}

impl ImportEntry {
    pub fn path(&self) -> &str {
        match self {
            ImportEntry::Path(path) => path,
            ImportEntry::Detailed(opts) => &opts.path,
        }
    }

    pub fn follows_imports(&self) -> bool {
        match self {
            ImportEntry::Path(_) => true,
            ImportEntry::Detailed(opts) => !opts.disable_imports,
        }
    }

    pub fn ignore_rules(&self) -> &[String] {
        match self {
            ImportEntry::Path(_) => &[],
            ImportEntry::Detailed(opts) => &opts.ignore_rules,
        }
    }
}

/// A single string or a list of strings (`pattern: foo` vs `patterns: [foo, bar]`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// A rule as written in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRule {
    /// Replacement text. May reference capture groups (`$1`) of regex patterns.
    pub expected: String,
    #[serde(default)]
    pub pattern: Option<OneOrMany>,
    #[serde(default)]
    pub patterns: Option<OneOrMany>,
    /// `$N`: a match is ignored when capture group N is non-empty.
    #[serde(default)]
    pub regexp_must_empty: Option<String>,
    #[serde(default)]
    pub options: RuleOptions,
    #[serde(default)]
    pub specs: Vec<RuleSpec>,
    /// Free-form description shown alongside a proposed change.
    #[serde(default)]
    pub prh: Option<String>,
}

impl RawRule {
    /// All raw pattern strings, `pattern` entries first.
    pub fn raw_patterns(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(p) = self.pattern.clone() {
            out.extend(p.into_vec());
        }
        if let Some(p) = self.patterns.clone() {
            out.extend(p.into_vec());
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOptions {
    /// Wrap every pattern in ASCII word boundaries.
    #[serde(default)]
    pub word_boundary: bool,
}

/// Embedded example: applying the rule to `from` must produce `to`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleSpec {
    pub from: String,
    pub to: String,
}
