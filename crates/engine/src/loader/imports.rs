//! `imports` resolution with cycle detection and a depth limit.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::rule::Rule;
use crate::schema::{ImportEntry, RuleFile, SUPPORTED_VERSION};

use super::error::{LoadError, Result};

/// Maximum import chain depth to prevent runaway recursion.
pub const MAX_IMPORT_DEPTH: usize = 8;

/// Read and parse a rule file from disk.
pub(super) fn read_rule_file(path: &Path) -> Result<RuleFile> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rule_file(&contents, path)
}

/// Parse rule file contents; `path` is only used for error reporting.
pub(super) fn parse_rule_file(contents: &str, path: &Path) -> Result<RuleFile> {
    let file: RuleFile = serde_yaml::from_str(contents).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    if file.version != SUPPORTED_VERSION {
        return Err(LoadError::UnsupportedVersion {
            path: path.to_path_buf(),
            version: file.version,
        });
    }

    Ok(file)
}

/// Compile the rules of `file`, located at `origin`, merging in its imports.
///
/// `chain` holds the canonical paths of the files currently being resolved,
/// outermost first.
pub(super) fn collect_rules(
    file: &RuleFile,
    origin: &Path,
    chain: &mut Vec<PathBuf>,
    follow_imports: bool,
) -> Result<Vec<Rule>> {
    let base_dir = origin.parent().unwrap_or_else(|| Path::new("."));

    let mut imported = Vec::new();
    if follow_imports {
        for entry in &file.imports {
            imported.extend(resolve_import(entry, base_dir, chain)?);
        }
    }

    let local = compile_rules(file, origin)?;
    Ok(override_imported(imported, local))
}

fn resolve_import(entry: &ImportEntry, base_dir: &Path, chain: &mut Vec<PathBuf>) -> Result<Vec<Rule>> {
    let target = base_dir.join(entry.path());
    let canonical = fs::canonicalize(&target).map_err(|source| LoadError::Read {
        path: target.clone(),
        source,
    })?;

    if chain.contains(&canonical) {
        return Err(LoadError::ImportCycle { path: canonical });
    }
    if chain.len() >= MAX_IMPORT_DEPTH {
        return Err(LoadError::ImportTooDeep {
            path: canonical,
            max: MAX_IMPORT_DEPTH,
        });
    }

    let file = read_rule_file(&canonical)?;
    chain.push(canonical.clone());
    let result = collect_rules(&file, &canonical, chain, entry.follows_imports());
    chain.pop();

    let mut rules = result?;
    let ignore = entry.ignore_rules();
    if !ignore.is_empty() {
        rules.retain(|rule| !ignore.iter().any(|name| rule.matches_ignore(name)));
    }

    debug!(path = %canonical.display(), rules = rules.len(), "resolved import");
    Ok(rules)
}

fn compile_rules(file: &RuleFile, origin: &Path) -> Result<Vec<Rule>> {
    file.rules
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            Rule::compile(raw).map_err(|source| LoadError::Rule {
                path: origin.to_path_buf(),
                index,
                expected: raw.expected.clone(),
                source,
            })
        })
        .collect()
}

/// Imported rules first, minus any whose `expected` a local rule redefines.
fn override_imported(imported: Vec<Rule>, local: Vec<Rule>) -> Vec<Rule> {
    let mut merged: Vec<Rule> = imported
        .into_iter()
        .filter(|rule| !local.iter().any(|l| l.expected() == rule.expected()))
        .collect();
    merged.extend(local);
    merged
}
