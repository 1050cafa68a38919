//! How the conda environment is materialized from the spec file.

use crate::bundler::error::Error;
use std::{ffi::OsString, path::Path, str::FromStr};

/// Command used to create the temporary environment.
///
/// # Configuration
///
/// ```toml
/// [installer]
/// env_strategy = "conda-lock"
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EnvCreateStrategy {
    /// `conda env create --prefix P --file environment.yml --force`
    #[default]
    EnvFile,

    /// `conda create --prefix P --file conda-win-64.lock --yes`
    ///
    /// For explicit lock files produced by conda-lock. `conda create` has no force flag, so
    /// an existing prefix is removed before the command runs.
    CondaLock,
}

impl EnvCreateStrategy {
    /// Arguments passed to conda to create `prefix` from `spec_file`.
    pub fn create_args(self, prefix: &Path, spec_file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self {
            Self::EnvFile => vec!["env".into(), "create".into()],
            Self::CondaLock => vec!["create".into()],
        };
        args.extend([
            "--prefix".into(),
            prefix.as_os_str().to_owned(),
            "--file".into(),
            spec_file.as_os_str().to_owned(),
        ]);
        args.push(match self {
            Self::EnvFile => "--force".into(),
            Self::CondaLock => "--yes".into(),
        });
        args
    }

    /// True when the prefix has to be cleared before the create command.
    pub fn needs_clean_prefix(self) -> bool {
        matches!(self, Self::CondaLock)
    }

    /// Name used in manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnvFile => "env-file",
            Self::CondaLock => "conda-lock",
        }
    }
}

impl FromStr for EnvCreateStrategy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "env-file" => Ok(Self::EnvFile),
            "conda-lock" => Ok(Self::CondaLock),
            _ => Err(Error::InvalidOption {
                option: "env_strategy",
                value: value.to_string(),
                reason: "must be 'env-file' or 'conda-lock'".to_string(),
            }),
        }
    }
}
