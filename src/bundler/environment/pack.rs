//! Environment packing with conda-pack.

use crate::{
    bail,
    bundler::{
        builder::Toolchain,
        error::{ErrorExt, Result},
        settings::InstallerConfig,
        utils::{
            fs::{self, ScopedFile},
            process::{CommandRunner, ToolCommand},
        },
    },
};
use std::path::{Path, PathBuf};

/// Archive conda-pack writes for `prefix`: the prefix path with `.tar` appended.
pub fn packed_archive_path(prefix: &Path) -> PathBuf {
    let mut archive = prefix.as_os_str().to_owned();
    archive.push(".tar");
    PathBuf::from(archive)
}

/// Packs the environment at `prefix` and unpacks it into `staging_dir/{env_name}`.
///
/// The temporary environment is removed once conda-pack returns, whether it succeeded or
/// not; a pack failure is returned after that removal. The archive is deleted when this
/// function returns, on every path.
pub async fn pack_environment<R: CommandRunner>(
    config: &InstallerConfig,
    tools: &Toolchain,
    runner: &R,
    staging_dir: &Path,
    prefix: &Path,
) -> Result<()> {
    log::info!("Running conda-pack");

    let archive = ScopedFile::new(packed_archive_path(prefix));
    let pack = ToolCommand::new(&tools.conda_pack)
        .arg("--prefix")
        .arg(prefix)
        .arg("--output")
        .arg(archive.path())
        .args(["--format", "tar", "--ignore-missing-files", "--force"]);
    let packed = runner.run(&pack).await;

    remove_environment(tools, runner, prefix).await;
    packed?;

    let destination = staging_dir.join(config.env_name());
    unpack_archive(archive.path(), &destination).await
}

/// Removes the temporary environment at `prefix`.
///
/// Asks conda first, then deletes whatever is left. Failures are logged, never returned.
pub async fn remove_environment<R: CommandRunner>(tools: &Toolchain, runner: &R, prefix: &Path) {
    log::info!("Cleaning temporary env");

    let remove = ToolCommand::new(&tools.conda)
        .args(["env", "remove", "-y", "-p"])
        .arg(prefix);
    if let Err(e) = runner.run(&remove).await {
        log::warn!("conda could not remove {}: {}", prefix.display(), e);
    }

    if let Err(e) = fs::remove_dir_all(prefix).await {
        log::warn!("{}", e);
    }
    if prefix.exists() {
        log::warn!(
            "Could not remove temporary environment: {}",
            prefix.display()
        );
    }
}

/// Extracts a tar archive into `destination`, creating it if needed.
async fn unpack_archive(archive: &Path, destination: &Path) -> Result<()> {
    log::debug!(
        "Unpacking {} into {}",
        archive.display(),
        destination.display()
    );

    let archive = archive.to_path_buf();
    let destination = destination.to_path_buf();
    let task = tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&destination)
            .fs_context("creating environment directory", &destination)?;
        let file = std::fs::File::open(&archive).fs_context("opening packed environment", &archive)?;
        tar::Archive::new(file)
            .unpack(&destination)
            .fs_context("unpacking packed environment", &archive)
    });

    match task.await {
        Ok(result) => result,
        Err(e) => bail!("Unpack task panicked: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        Error, InstallerConfigBuilder,
        testutil::{FakeRunner, simulate_tool},
    };
    use tempfile::TempDir;

    struct Fixture {
        _root: TempDir,
        work: TempDir,
        config: InstallerConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            std::fs::write(root.path().join("environment.yml"), "name: test\n").unwrap();
            let config = InstallerConfigBuilder::new("package", root.path())
                .build()
                .unwrap();
            Self {
                _root: root,
                work: TempDir::new().unwrap(),
                config,
            }
        }

        fn staging(&self) -> PathBuf {
            let staging = self.work.path().join("staging");
            std::fs::create_dir_all(&staging).unwrap();
            staging
        }

        fn prefix(&self) -> PathBuf {
            let prefix = self.work.path().join("env").join("package_env");
            std::fs::create_dir_all(prefix.join("Lib/site-packages")).unwrap();
            std::fs::write(prefix.join("python.exe"), "interpreter").unwrap();
            prefix
        }
    }

    #[test]
    fn archive_sits_next_to_prefix() {
        assert_eq!(
            packed_archive_path(Path::new("/tmp/x/app.v2_env")),
            PathBuf::from("/tmp/x/app.v2_env.tar")
        );
    }

    #[tokio::test]
    async fn success_unpacks_and_cleans_up() {
        let fx = Fixture::new();
        let staging = fx.staging();
        let prefix = fx.prefix();
        let runner = FakeRunner::simulating_tools();

        pack_environment(&fx.config, &Toolchain::default(), &runner, &staging, &prefix)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(staging.join("package_env/python.exe")).unwrap(),
            "interpreter"
        );
        assert!(!prefix.exists());
        assert!(!packed_archive_path(&prefix).exists());

        let programs: Vec<_> = runner.commands().iter().map(|c| c.display()).collect();
        assert!(programs[0].starts_with("conda-pack --prefix"));
        assert!(programs[1].starts_with("conda env remove -y -p"));
    }

    #[tokio::test]
    async fn packer_failure_still_removes_env_and_archive() {
        let fx = Fixture::new();
        let staging = fx.staging();
        let prefix = fx.prefix();
        // Leave a partial archive behind, then fail.
        let runner = FakeRunner::new(|cmd| {
            if cmd.program().ends_with("conda-pack") {
                let out = cmd.value_of("--output").unwrap();
                std::fs::write(out, "partial").unwrap();
                return Err(Error::SubprocessFailed {
                    command: cmd.display(),
                    code: Some(1),
                });
            }
            simulate_tool(cmd)
        });

        let err = pack_environment(&fx.config, &Toolchain::default(), &runner, &staging, &prefix)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::SubprocessFailed { .. }));
        assert!(!prefix.exists());
        assert!(!packed_archive_path(&prefix).exists());
        assert!(!staging.join("package_env").exists());
    }

    #[tokio::test]
    async fn extraction_failure_still_removes_archive() {
        let fx = Fixture::new();
        let staging = fx.staging();
        let prefix = fx.prefix();
        let runner = FakeRunner::new(|cmd| {
            if cmd.program().ends_with("conda-pack") {
                std::fs::write(cmd.value_of("--output").unwrap(), vec![0xffu8; 1024]).unwrap();
                return Ok(());
            }
            simulate_tool(cmd)
        });

        let err = pack_environment(&fx.config, &Toolchain::default(), &runner, &staging, &prefix)
            .await;

        assert!(err.is_err());
        assert!(!prefix.exists());
        assert!(!packed_archive_path(&prefix).exists());
    }

    #[tokio::test]
    async fn conda_remove_failure_is_only_a_warning() {
        let fx = Fixture::new();
        let staging = fx.staging();
        let prefix = fx.prefix();
        let runner = FakeRunner::failing_on("env remove");

        pack_environment(&fx.config, &Toolchain::default(), &runner, &staging, &prefix)
            .await
            .unwrap();

        assert!(!prefix.exists());
        assert!(staging.join("package_env/python.exe").is_file());
    }
}
