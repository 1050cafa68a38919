//! NSIS toolset location.

use crate::bundler::builder::tool_detection::locate_tool;
use std::path::{Path, PathBuf};

/// Program name of the NSIS compiler.
pub const MAKENSIS: &str = "makensis";

/// Environment variable that can point at makensis.
pub const MAKENSIS_ENV: &str = "MAKENSIS_EXE";

/// Locates makensis.
///
/// Explicit path first, then `MAKENSIS_EXE`, then `PATH`. Falls back to the bare program
/// name, so a missing NSIS install shows up as a spawn error when the build reaches it.
pub fn locate_makensis(explicit: Option<&Path>) -> PathBuf {
    locate_tool(MAKENSIS, MAKENSIS_ENV, explicit)
}
