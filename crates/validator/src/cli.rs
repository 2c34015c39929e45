use std::path::PathBuf;

use clap::Parser;
use prh_validator::ValidatorConfig;

/// Validate prh rule files.
///
/// Every rule file under the root directory is loaded and applied to the
/// target document. The run stops at the first file that fails.
#[derive(Parser, Debug)]
#[command(name = "prh-validate", version, about = "Validate prh rule files against a target document")]
pub struct CliArgs {
    /// Directory scanned for rule files (default: current directory)
    #[arg(long, env = "PRH_RULES_ROOT")]
    pub root: Option<PathBuf>,

    /// Document every rule file is applied to, relative to the root (default: README.ja.md)
    #[arg(long, env = "PRH_TARGET_DOCUMENT")]
    pub target: Option<PathBuf>,

    /// Rule file extension; repeat to accept several (default: yml)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Directory name to skip; repeat to skip several (default: node_modules)
    #[arg(long = "exclude", value_name = "DIR")]
    pub exclude_dirs: Vec<String>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Overlay command-line values on a loaded config. Lists given on the
    /// command line replace the configured ones.
    pub fn apply_to(&self, mut config: ValidatorConfig) -> ValidatorConfig {
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(target) = &self.target {
            config.target_document = target.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if !self.exclude_dirs.is_empty() {
            config.exclude_dirs = self.exclude_dirs.clone();
        }
        config
    }
}
