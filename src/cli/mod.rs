//! Command line interface for conda_nsis_bundler.
//!
//! Reads the installer manifest, applies flag overrides, runs the [`Bundler`] and reports
//! the outcome.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::Bundler;
use crate::error::{CliError, Result};
use crate::metadata;
use std::path::PathBuf;

/// Main CLI entry point
///
/// Returns the process exit code: 0 when the installer was built, 1 otherwise.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new(false);

    match execute(&args).await {
        Ok(installer) => {
            output.success(&installer.display().to_string())?;
            Ok(0)
        }
        Err(e) => {
            output.error(&format!("Error: {}", e))?;
            Ok(1)
        }
    }
}

/// Build the installer described by `args`, returning its path.
pub async fn execute(args: &Args) -> Result<PathBuf> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let manifest = metadata::load_manifest(&args.config)?;
    let builder = args.apply(manifest.config_builder()?, &manifest.tool_overrides());
    let mut config = builder.build()?;
    manifest.apply_shortcuts(&mut config);

    log::info!(
        "Building installer for {} from {}",
        config.package_name(),
        args.config.display()
    );
    let installer = Bundler::new(config).build().await?;
    Ok(installer)
}
