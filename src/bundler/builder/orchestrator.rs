//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the installer pipeline:
//! environment creation, packing, staging, script rendering and the NSIS build.

use super::tool_detection::Toolchain;
use crate::bundler::{
    Result,
    environment::{create_environment, pack_environment},
    error::{Context, Error},
    platform::windows::nsis,
    settings::InstallerConfig,
    staging::stage_assets,
    utils::process::{CommandRunner, SystemRunner},
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Main bundler orchestrator.
///
/// Owns one [`InstallerConfig`] and the resolved [`Toolchain`], and drives the stages in
/// order. Stages are awaited one after another; nothing runs concurrently.
///
/// # Examples
///
/// ```no_run
/// use conda_nsis_bundler::bundler::{Bundler, InstallerConfigBuilder};
///
/// # async fn example() -> conda_nsis_bundler::bundler::Result<()> {
/// let mut config = InstallerConfigBuilder::new("snake-simulator", "snake")
///     .version("0.1")
///     .include(["snake.py", "assets"])
///     .build()?;
/// config.add_shortcut("$INSTDIR\\snake.lnk", "$PYTHON", "$INSTDIR\\snake.py", "");
///
/// let installer = Bundler::new(config).build().await?;
/// println!("Created: {}", installer.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R: CommandRunner = SystemRunner> {
    config: InstallerConfig,
    tools: Toolchain,
    runner: R,
}

impl Bundler {
    /// Creates a bundler that runs the real tools.
    ///
    /// Tool locations are resolved here, from the config's overrides, the environment and
    /// `PATH` (see [`Toolchain::resolve`]).
    pub fn new(config: InstallerConfig) -> Self {
        let tools = Toolchain::resolve(config.tools());
        Self::with_runner(config, tools, SystemRunner)
    }
}

impl<R: CommandRunner> Bundler<R> {
    /// Creates a bundler with an explicit toolchain and command runner.
    pub fn with_runner(config: InstallerConfig, tools: Toolchain, runner: R) -> Self {
        Self {
            config,
            tools,
            runner,
        }
    }

    /// Returns a reference to the installer configuration.
    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// Mutable access to the configuration, for registering shortcuts after construction.
    pub fn config_mut(&mut self) -> &mut InstallerConfig {
        &mut self.config
    }

    /// Returns the resolved tool paths.
    pub fn tools(&self) -> &Toolchain {
        &self.tools
    }

    /// Returns the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Builds the installer in a fresh staging directory.
    ///
    /// The staging directory is removed when this returns, whether the build succeeded
    /// or not.
    ///
    /// # Returns
    ///
    /// Absolute path of the installer, as declared in the configuration.
    pub async fn build(&self) -> Result<PathBuf> {
        let staging = TempDir::new()
            .map_err(Error::from)
            .context("creating staging directory")?;
        log::debug!("Staging in {}", staging.path().display());
        self.build_in(staging.path()).await
    }

    /// Builds the installer using `staging_dir` as the staging directory.
    ///
    /// The caller owns `staging_dir`; it is left in place afterwards.
    ///
    /// # Process
    ///
    /// 1. Create the environment in a temporary directory
    /// 2. Pack it into `staging_dir/{env_name}` (removes the environment)
    /// 3. Remove the temporary directory
    /// 4. Copy includes and icon into `staging_dir`
    /// 5. Render `staging_dir/installer.nsi`
    /// 6. Run makensis
    pub async fn build_in(&self, staging_dir: &Path) -> Result<PathBuf> {
        let env_dir = TempDir::new()
            .map_err(Error::from)
            .context("creating environment directory")?;
        let prefix = env_dir.path().join(self.config.env_name());

        self.create_environment(&prefix).await?;
        self.pack_environment(staging_dir, &prefix).await?;

        let env_path = env_dir.path().to_path_buf();
        if let Err(e) = env_dir.close() {
            log::warn!(
                "Could not remove temporary directory {}: {}",
                env_path.display(),
                e
            );
        }

        self.stage_assets(staging_dir).await?;
        let script = self.render_script(staging_dir).await?;
        self.invoke_builder(&script).await?;

        let installer = self.config.installer_name().to_path_buf();
        log::info!("Installer created at {}", installer.display());
        Ok(installer)
    }

    /// Creates the conda environment at `prefix`.
    pub async fn create_environment(&self, prefix: &Path) -> Result<()> {
        create_environment(&self.config, &self.tools, &self.runner, prefix).await
    }

    /// Packs the environment at `prefix` into `staging_dir`, removing the environment.
    pub async fn pack_environment(&self, staging_dir: &Path, prefix: &Path) -> Result<()> {
        pack_environment(&self.config, &self.tools, &self.runner, staging_dir, prefix).await
    }

    /// Copies includes and icon into `staging_dir`.
    pub async fn stage_assets(&self, staging_dir: &Path) -> Result<()> {
        stage_assets(&self.config, staging_dir).await
    }

    /// Renders the installer script into `staging_dir`.
    pub async fn render_script(&self, staging_dir: &Path) -> Result<PathBuf> {
        nsis::render_script(&self.config, staging_dir).await
    }

    /// Compiles `script` with makensis.
    pub async fn invoke_builder(&self, script: &Path) -> Result<()> {
        nsis::invoke_builder(
            &self.runner,
            &self.tools.makensis,
            script,
            self.config.installer_name(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{InstallerConfigBuilder, testutil::FakeRunner};

    fn bundler(root: &Path, runner: FakeRunner) -> Bundler<FakeRunner> {
        std::fs::write(root.join("environment.yml"), "name: test\n").unwrap();
        std::fs::write(root.join("app.py"), "print('hi')").unwrap();
        let config = InstallerConfigBuilder::new("app", root)
            .version("1.0")
            .installer_name(root.join("dist/setup.exe"))
            .include(["app.py"])
            .install_root_package(false)
            .build()
            .unwrap();
        Bundler::with_runner(config, Toolchain::default(), runner)
    }

    #[tokio::test]
    async fn stages_run_in_order() {
        let root = tempfile::TempDir::new().unwrap();
        let staging = tempfile::TempDir::new().unwrap();
        let bundler = bundler(root.path(), FakeRunner::simulating_tools());

        let installer = bundler.build_in(staging.path()).await.unwrap();

        assert_eq!(installer, root.path().join("dist/setup.exe"));
        let programs: Vec<String> = bundler
            .runner()
            .commands()
            .iter()
            .map(|c| c.program().display().to_string())
            .collect();
        assert_eq!(programs, ["conda", "conda-pack", "conda", "makensis"]);

        let s = staging.path();
        assert!(s.join("app_env/Lib/site-packages/sitecustomize.py").is_file());
        assert!(s.join("app.py").is_file());
        assert!(s.join("installer.nsi").is_file());
        assert!(root.path().join("dist").is_dir());
    }

    #[tokio::test]
    async fn create_failure_stops_pipeline() {
        let root = tempfile::TempDir::new().unwrap();
        let staging = tempfile::TempDir::new().unwrap();
        let bundler = bundler(root.path(), FakeRunner::failing_on("env create"));

        let err = bundler.build_in(staging.path()).await.unwrap_err();

        assert!(matches!(err, Error::SubprocessFailed { .. }));
        assert_eq!(bundler.runner().commands().len(), 1);
        assert!(!staging.path().join("installer.nsi").exists());
    }

    #[tokio::test]
    async fn makensis_failure_is_reported() {
        let root = tempfile::TempDir::new().unwrap();
        let bundler = bundler(root.path(), FakeRunner::failing_on("makensis"));

        let err = bundler.build().await.unwrap_err();
        assert!(matches!(err, Error::SubprocessFailed { code: Some(1), .. }));
    }
}
