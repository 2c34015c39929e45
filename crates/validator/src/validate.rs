//! Fail-fast validation of discovered rule files.

use std::io::Write;

use prh_engine::{ChangeSet, Engine};
use tracing::{debug, error, info};

use crate::config::ResolvedConfig;
use crate::discovery::{discover, RuleFile};
use crate::error::ValidateError;

/// Line written once every rule file has validated.
pub const DONE_MARKER: &str = "😸 done";

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub validated: usize,
}

/// Discover rule files under `config.root` and validate each one, writing
/// progress lines to `out`.
pub fn run<W: Write>(config: &ResolvedConfig, out: &mut W) -> Result<Summary, ValidateError> {
    let files = discover(config)?;
    info!(root = %config.root.display(), count = files.len(), "discovered rule files");
    validate_all(&files, config, out)
}

/// Validate `files` in order, stopping at the first failure.
///
/// On failure `processing... <file>` is written to `out` and the engine error
/// is returned as is. On success the [`DONE_MARKER`] line is written.
pub fn validate_all<W: Write>(
    files: &[RuleFile],
    config: &ResolvedConfig,
    out: &mut W,
) -> Result<Summary, ValidateError> {
    for file in files {
        if let Err(e) = validate_file(file, config) {
            error!(path = %file, error = %e, "rule file failed validation");
            writeln!(out, "processing... {file}\n")?;
            return Err(e);
        }
    }

    writeln!(out, "{DONE_MARKER}")?;
    info!(validated = files.len(), "all rule files validated");
    Ok(Summary {
        validated: files.len(),
    })
}

/// Load one rule file and compute its change set against the target document.
pub fn validate_file(file: &RuleFile, config: &ResolvedConfig) -> Result<ChangeSet, ValidateError> {
    let engine = Engine::from_yaml_file_path(file.absolute(&config.root))?;
    let changes = engine.make_change_set(&config.target_document)?;
    debug!(path = %file, rules = engine.rules().len(), diffs = changes.len(), "validated rule file");
    Ok(changes)
}
