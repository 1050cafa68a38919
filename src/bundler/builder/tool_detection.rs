//! External tool detection.
//!
//! Resolves the programs the pipeline shells out to. conda is additionally looked up in
//! the Windows registry. Resolution happens once, when a
//! [`Bundler`](super::Bundler) is constructed, and never fails: an unresolved tool keeps its
//! bare name and surfaces as a spawn error when its stage runs.

use crate::bundler::{platform::windows::nsis, settings::ToolOverrides};
use std::path::{Path, PathBuf};

/// Program name of conda.
pub const CONDA: &str = "conda";
/// Environment variable that can point at conda. Set by `conda activate`.
pub const CONDA_ENV: &str = "CONDA_EXE";
/// Program name of conda-pack.
pub const CONDA_PACK: &str = "conda-pack";
/// Environment variable that can point at conda-pack.
pub const CONDA_PACK_ENV: &str = "CONDA_PACK_EXE";

/// Concrete program paths for the external tools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    /// conda, used to create and remove environments
    pub conda: PathBuf,
    /// conda-pack, used to archive an environment
    pub conda_pack: PathBuf,
    /// NSIS compiler
    pub makensis: PathBuf,
}

impl Default for Toolchain {
    /// Bare program names, looked up by the OS at spawn time.
    fn default() -> Self {
        Self {
            conda: PathBuf::from(CONDA),
            conda_pack: PathBuf::from(CONDA_PACK),
            makensis: PathBuf::from(nsis::MAKENSIS),
        }
    }
}

impl Toolchain {
    /// Resolves every tool, honoring explicit overrides first.
    pub fn resolve(overrides: &ToolOverrides) -> Self {
        Self {
            conda: locate_tool_with(
                CONDA,
                CONDA_ENV,
                overrides.conda.as_deref(),
                registered_conda,
            ),
            conda_pack: locate_tool(CONDA_PACK, CONDA_PACK_ENV, overrides.conda_pack.as_deref()),
            makensis: nsis::locate_makensis(overrides.makensis.as_deref()),
        }
    }
}

/// Locates `program`: `explicit`, then `$env_var`, then `PATH`, then the bare name.
///
/// Empty values are treated as unset.
pub fn locate_tool(program: &str, env_var: &str, explicit: Option<&Path>) -> PathBuf {
    locate_tool_with(program, env_var, explicit, || None)
}

/// Like [`locate_tool`], with `platform_lookup` consulted between the environment variable
/// and `PATH`.
pub fn locate_tool_with(
    program: &str,
    env_var: &str,
    explicit: Option<&Path>,
    platform_lookup: impl FnOnce() -> Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        log::debug!("Using {} from configuration: {}", program, path.display());
        return path.to_path_buf();
    }

    if let Some(value) = std::env::var_os(env_var).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(value);
        log::debug!("Using {} from {}: {}", program, env_var, path.display());
        return path;
    }

    if let Some(path) = platform_lookup() {
        log::debug!("Using registered {}: {}", program, path.display());
        return path;
    }

    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program, path.display());
            path
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", program, e);
            PathBuf::from(program)
        }
    }
}

/// Registry key under `HKEY_CURRENT_USER` where Anaconda and Miniconda installers record
/// their install location, one subkey per installed version.
pub const CONDA_REGISTRY_KEY: &str = r"Software\Python\ContinuumAnalytics";

/// `Scripts\conda.exe` of the first conda install registered for the current user.
/// `None` when nothing is registered or the registered file is gone.
#[cfg(windows)]
pub fn registered_conda() -> Option<PathBuf> {
    use winreg::{
        RegKey,
        enums::{HKEY_CURRENT_USER, KEY_READ},
    };

    let lookup = || -> std::io::Result<PathBuf> {
        let vendor = RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags(CONDA_REGISTRY_KEY, KEY_READ)?;
        let version = vendor.enum_keys().next().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no registered conda version")
        })??;
        let install_dir: String = vendor
            .open_subkey_with_flags(format!(r"{}\InstallPath", version), KEY_READ)?
            .get_value("")?;
        Ok(PathBuf::from(install_dir).join("Scripts").join("conda.exe"))
    };

    match lookup() {
        Ok(conda) if conda.is_file() => Some(conda),
        Ok(conda) => {
            log::debug!("Registered conda does not exist: {}", conda.display());
            None
        }
        Err(e) => {
            log::debug!("No conda registered under HKCU\\{}: {}", CONDA_REGISTRY_KEY, e);
            None
        }
    }
}

/// Registry lookup; there is no registry outside Windows.
#[cfg(not(windows))]
pub fn registered_conda() -> Option<PathBuf> {
    None
}
