//! Configuration structures for installer builds.
//!
//! An [`InstallerConfig`] is constructed once through [`InstallerConfigBuilder`], which
//! validates the inputs and fills in defaults. After construction only the shortcut list
//! may change.

mod builder;
mod core;
mod environment;
mod package;
mod shortcut;
mod tools;
mod windows;

pub use builder::InstallerConfigBuilder;
pub use core::{IncludeFile, InstallerConfig};
pub use environment::EnvCreateStrategy;
pub use package::PackageSettings;
pub use shortcut::Shortcut;
pub use tools::ToolOverrides;
pub use windows::NsisCompression;
