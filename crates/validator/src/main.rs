mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use prh_validator::ValidatorConfig;

use crate::cli::CliArgs;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the validator's progress lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = ValidatorConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let config = args.apply_to(config);

    let base_dir = std::env::current_dir().context("failed to determine working directory")?;
    let resolved = config.resolve(&base_dir);
    info!(
        root = %resolved.root.display(),
        target = %resolved.target_document.display(),
        "starting rule file validation"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    prh_validator::run(&resolved, &mut out)?;
    Ok(())
}
