//! Command line argument parsing and validation.
//!
//! Flags override the matching manifest values.

use crate::bundler::{InstallerConfigBuilder, NsisCompression, ToolOverrides};
use clap::Parser;
use std::path::PathBuf;

/// Windows installer bundler for conda-based Python applications
#[derive(Parser, Debug)]
#[command(
    name = "conda_nsis_bundler",
    version,
    about = "Builds a Windows installer for a Python application from a conda environment",
    long_about = "Builds a self-contained NSIS installer for a Python application.

Creates the conda environment described by the manifest, relocates it with conda-pack,
stages the application files next to it and compiles the installer with makensis.

Usage:
  conda_nsis_bundler --config installer.toml
  conda_nsis_bundler --config installer.toml --output dist/setup.exe --compression zlib

Exit code 0 = installer written to the configured output path."
)]
pub struct Args {
    /// Installer manifest (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Output path for the installer, overrides [installer].output
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// NSIS compression: zlib, bzip2 or lzma
    #[arg(long, value_name = "MODE")]
    pub compression: Option<String>,

    /// conda executable
    #[arg(long, value_name = "PATH")]
    pub conda: Option<PathBuf>,

    /// conda-pack executable
    #[arg(long, value_name = "PATH")]
    pub conda_pack: Option<PathBuf>,

    /// makensis executable
    #[arg(long, value_name = "PATH")]
    pub makensis: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.config.as_os_str().is_empty() {
            return Err("Config path cannot be empty".to_string());
        }

        if let Some(compression) = &self.compression {
            if compression.parse::<NsisCompression>().is_err() {
                let valid: Vec<&str> = NsisCompression::ALL.iter().map(|c| c.as_str()).collect();
                return Err(format!(
                    "Invalid compression: {}. Valid values: {}",
                    compression,
                    valid.join(", ")
                ));
            }
        }

        Ok(())
    }

    /// Applies the flag overrides on top of a manifest-derived builder.
    ///
    /// Tool flags replace only the tools they name.
    pub fn apply(
        &self,
        mut builder: InstallerConfigBuilder,
        manifest_tools: &ToolOverrides,
    ) -> InstallerConfigBuilder {
        if let Some(output) = &self.output {
            builder = builder.installer_name(output);
        }
        if let Some(compression) = &self.compression {
            builder = builder.compression(compression);
        }

        builder.tools(ToolOverrides {
            conda: self.conda.clone().or_else(|| manifest_tools.conda.clone()),
            conda_pack: self
                .conda_pack
                .clone()
                .or_else(|| manifest_tools.conda_pack.clone()),
            makensis: self
                .makensis
                .clone()
                .or_else(|| manifest_tools.makensis.clone()),
        })
    }
}
