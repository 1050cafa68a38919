//! NSIS installer build execution.
//!
//! Compiles the rendered NSI script into the installer executable using makensis.

use crate::bundler::{
    error::{ErrorExt, Result},
    utils::process::{CommandRunner, ToolCommand},
};
use std::path::Path;

/// makensis invocation for `nsi_path`.
///
/// The script is the only input; the output path is the `OutFile` it declares.
pub fn makensis_command(makensis: &Path, nsi_path: &Path) -> ToolCommand {
    ToolCommand::new(makensis)
        .args([
            "-V3", // Verbosity level 3
            "-INPUTCHARSET",
            "UTF8",
        ])
        .arg(nsi_path)
}

/// Run makensis to compile the NSI script into the installer executable.
///
/// Creates the parent directory of `installer` first, since makensis will not. A non-zero
/// exit is returned as [`Error::SubprocessFailed`](crate::bundler::Error). The installer
/// itself is not checked afterwards.
pub async fn invoke_builder<R: CommandRunner>(
    runner: &R,
    makensis: &Path,
    nsi_path: &Path,
    installer: &Path,
) -> Result<()> {
    if let Some(parent) = installer.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating installer output directory", parent)?;
    }

    log::info!("Running makensis");
    runner.run(&makensis_command(makensis, nsi_path)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{Error, testutil::FakeRunner};

    #[test]
    fn script_is_last_argument() {
        let cmd = makensis_command(Path::new("makensis"), Path::new("/tmp/stage/installer.nsi"));
        assert_eq!(
            cmd.display(),
            "makensis -V3 -INPUTCHARSET UTF8 /tmp/stage/installer.nsi"
        );
    }

    #[tokio::test]
    async fn creates_output_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let installer = tmp.path().join("dist/nested/setup.exe");
        let runner = FakeRunner::simulating_tools();

        invoke_builder(&runner, Path::new("makensis"), Path::new("installer.nsi"), &installer)
            .await
            .unwrap();

        assert!(tmp.path().join("dist/nested").is_dir());
        assert_eq!(runner.commands().len(), 1);
    }

    #[tokio::test]
    async fn failure_propagates() {
        let tmp = tempfile::TempDir::new().unwrap();
        let runner = FakeRunner::failing_on("makensis");
        let err = invoke_builder(
            &runner,
            Path::new("makensis"),
            Path::new("installer.nsi"),
            &tmp.path().join("setup.exe"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::SubprocessFailed { code: Some(1), .. }));
    }
}
