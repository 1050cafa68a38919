//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use conda_nsis_bundler::bundler::{CommandRunner, Error, Result, ToolCommand};
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Stands in for conda, conda-pack and makensis.
///
/// Reproduces the filesystem effects the pipeline depends on and records every command.
#[derive(Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<ToolCommand>>,
    fail_on: Option<&'static str>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any command line containing `needle` exits with code 2.
    pub fn failing_on(needle: &'static str) -> Self {
        Self {
            fail_on: Some(needle),
            ..Self::default()
        }
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(ToolCommand::display)
            .collect()
    }

    pub fn value_of(&self, program: &str, flag: &str) -> Option<PathBuf> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.program().ends_with(program))
            .find_map(|c| c.value_of(flag).map(PathBuf::from))
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        self.commands.lock().unwrap().push(command.clone());

        if let Some(needle) = self.fail_on {
            if command.display().contains(needle) {
                return Err(Error::SubprocessFailed {
                    command: command.display(),
                    code: Some(2),
                });
            }
        }

        let program = command
            .program()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let args: Vec<String> = command
            .get_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        match program {
            "conda" if args.iter().any(|a| a == "create") => {
                let prefix = Path::new(command.value_of("--prefix").unwrap());
                std::fs::create_dir_all(prefix.join("Lib/site-packages"))?;
                std::fs::write(prefix.join("python.exe"), "")?;
            }
            "conda-pack" => {
                let prefix = Path::new(command.value_of("--prefix").unwrap());
                let output = Path::new(command.value_of("--output").unwrap());
                let mut archive = tar::Builder::new(std::fs::File::create(output)?);
                archive.append_dir_all(".", prefix)?;
                archive.finish()?;
            }
            "makensis" => {
                // The script is the last argument and declares OutFile.
                let script = std::fs::read(args.last().unwrap())?;
                let script = String::from_utf8_lossy(&script[3..]).into_owned();
                let out_file = script
                    .lines()
                    .find_map(|l| l.strip_prefix("OutFile \""))
                    .and_then(|l| l.strip_suffix('"'))
                    .unwrap();
                std::fs::write(out_file, b"MZ")?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// A package root with an environment file, `snake.py` and `assets/logo.png`.
pub fn snake_project() -> tempfile::TempDir {
    let root = tempfile::TempDir::new().unwrap();
    let r = root.path();
    std::fs::write(r.join("environment.yml"), "name: snake\ndependencies:\n  - python\n").unwrap();
    std::fs::write(r.join("snake.py"), "print('snake')\n").unwrap();
    std::fs::create_dir_all(r.join("assets")).unwrap();
    std::fs::write(r.join("assets/logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    root
}
