//! Windows installer bundling for conda-based Python applications.
//!
//! Turns a Python application plus a conda environment spec into a self-contained NSIS
//! installer. The pipeline runs strictly in order:
//!
//! 1. [`create_environment`] - materialize the environment in a temporary prefix
//! 2. [`pack_environment`] - relocate it into the staging directory with conda-pack
//! 3. [`stage_assets`] - copy application files and icon next to it
//! 4. [`render_script`] - generate `installer.nsi`
//! 5. [`invoke_builder`] - compile it with makensis
//!
//! [`Bundler`] drives all five from one [`InstallerConfig`].

pub mod builder;
pub mod environment;
pub mod error;
pub mod platform;
pub mod settings;
pub mod staging;
pub mod utils;

#[cfg(test)]
mod testutil;

pub use builder::{Bundler, Toolchain};
pub use environment::{create_environment, pack_environment};
pub use error::{Error, Result};
pub use platform::windows::nsis::{NSI_TEMPLATE, invoke_builder, render_script};
pub use settings::{
    EnvCreateStrategy, IncludeFile, InstallerConfig, InstallerConfigBuilder, NsisCompression,
    PackageSettings, Shortcut, ToolOverrides,
};
pub use staging::stage_assets;
pub use utils::process::{CommandRunner, SystemRunner, ToolCommand};
