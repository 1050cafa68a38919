//! Test helpers: a recording command runner that imitates the external tools.

use crate::bundler::{
    error::{Error, Result},
    utils::process::{CommandRunner, ToolCommand},
};
use std::{ffi::OsStr, path::Path, sync::Mutex};

type Handler = Box<dyn Fn(&ToolCommand) -> Result<()> + Send + Sync>;

/// Records every command and answers with a handler instead of spawning anything.
pub struct FakeRunner {
    commands: Mutex<Vec<ToolCommand>>,
    handler: Handler,
}

impl FakeRunner {
    pub fn new(handler: impl Fn(&ToolCommand) -> Result<()> + Send + Sync + 'static) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    /// Imitates conda, conda-pack and makensis with [`simulate_tool`].
    pub fn simulating_tools() -> Self {
        Self::new(simulate_tool)
    }

    /// Like [`simulating_tools`](Self::simulating_tools), but any command line containing
    /// `needle` exits with code 1.
    pub fn failing_on(needle: &'static str) -> Self {
        Self::new(move |cmd| {
            if cmd.display().contains(needle) {
                return Err(Error::SubprocessFailed {
                    command: cmd.display(),
                    code: Some(1),
                });
            }
            simulate_tool(cmd)
        })
    }

    pub fn commands(&self) -> Vec<ToolCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        self.commands.lock().unwrap().push(command.clone());
        (self.handler)(command)
    }
}

/// Minimal stand-ins for the filesystem effects of the real tools.
///
/// - `conda ... create --prefix P` creates `P/Lib/site-packages` and `P/python.exe`
/// - `conda-pack --prefix P --output A` tars the contents of `P` into `A`
/// - everything else succeeds without side effects
pub fn simulate_tool(cmd: &ToolCommand) -> Result<()> {
    let program = cmd
        .program()
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    let is_create = cmd.get_args().iter().any(|a| a == "create");

    match program {
        "conda" if is_create => {
            let prefix = Path::new(cmd.value_of("--prefix").unwrap());
            std::fs::create_dir_all(prefix.join("Lib").join("site-packages"))?;
            std::fs::write(prefix.join("python.exe"), "interpreter")?;
        }
        "conda-pack" => {
            let prefix = Path::new(cmd.value_of("--prefix").unwrap());
            let output = Path::new(cmd.value_of("--output").unwrap());
            let mut builder = tar::Builder::new(std::fs::File::create(output)?);
            builder.append_dir_all(".", prefix)?;
            builder.finish()?;
        }
        _ => {}
    }
    Ok(())
}
