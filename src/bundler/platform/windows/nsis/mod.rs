//! Windows NSIS installer creation.
//!
//! Renders an NSI script for the staged application and compiles it with makensis
//! (Nullsoft Scriptable Install System).
//!
//! # Module Organization
//!
//! - `template` - built-in NSI script template
//! - `toolset` - makensis location
//! - `script` - NSI script generation from templates
//! - `build` - makensis execution
//! - `utils` - version formatting, NSIS paths, BOM output

mod build;
mod script;
mod template;
mod toolset;
mod utils;

pub use build::{invoke_builder, makensis_command};
pub use script::{SCRIPT_FILE_NAME, render_script, render_template, template_context};
pub use template::NSI_TEMPLATE;
pub use toolset::{MAKENSIS, MAKENSIS_ENV, locate_makensis};
pub use utils::format_version_for_nsis;
