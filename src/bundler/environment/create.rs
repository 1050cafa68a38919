//! Environment materialization.

use super::runtime_hook::SITECUSTOMIZE;
use crate::bundler::{
    builder::Toolchain,
    error::{Context, ErrorExt, Result},
    settings::InstallerConfig,
    utils::{
        fs,
        process::{CommandRunner, ToolCommand},
    },
};
use std::path::{Path, PathBuf};

/// `site-packages` of a Windows conda environment.
pub fn site_packages(prefix: &Path) -> PathBuf {
    prefix.join("Lib").join("site-packages")
}

/// Interpreter of a conda environment created on this host.
pub fn python_executable(prefix: &Path) -> PathBuf {
    if cfg!(windows) {
        prefix.join("python.exe")
    } else {
        prefix.join("bin").join("python")
    }
}

/// Creates the conda environment described by the configured spec file at `prefix`.
///
/// # Process
///
/// 1. Run the configured [`EnvCreateStrategy`](crate::bundler::EnvCreateStrategy),
///    replacing anything already at `prefix`
/// 2. Write `sitecustomize.py` into the environment's `site-packages`
/// 3. If `install_root_package` is set, `pip install` the package root into the environment
///
/// Any tool failure is returned as is; nothing is retried.
pub async fn create_environment<R: CommandRunner>(
    config: &InstallerConfig,
    tools: &Toolchain,
    runner: &R,
    prefix: &Path,
) -> Result<()> {
    log::info!("Creating conda environment from {}", config.env_file().display());

    let strategy = config.env_strategy();
    if strategy.needs_clean_prefix() {
        fs::remove_dir_all(prefix).await?;
    }

    let create = ToolCommand::new(&tools.conda).args(strategy.create_args(prefix, config.env_file()));
    runner.run(&create).await?;

    let site_packages = site_packages(prefix);
    tokio::fs::create_dir_all(&site_packages)
        .await
        .fs_context("creating site-packages directory", &site_packages)?;
    let hook = site_packages.join("sitecustomize.py");
    tokio::fs::write(&hook, SITECUSTOMIZE)
        .await
        .fs_context("writing sitecustomize.py", &hook)?;

    if config.install_root_package() {
        log::info!("Installing {} into the environment", config.package_root().display());
        let pip = ToolCommand::new(python_executable(prefix))
            .args(["-m", "pip", "install"])
            .arg(config.package_root())
            .arg("--no-warn-script-location");
        runner
            .run(&pip)
            .await
            .context("installing the package root into the environment")?;
    }

    Ok(())
}
