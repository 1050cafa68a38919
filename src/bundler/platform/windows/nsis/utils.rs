//! NSIS utility functions.
//!
//! Helper functions for version formatting, NSIS path building and script output.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Format version string for NSIS VIProductVersion.
///
/// NSIS requires exactly 4 numeric parts (major.minor.patch.build).
/// This function normalizes version strings to meet that requirement:
/// - "1" -> "1.0.0.0"
/// - "1.2" -> "1.2.0.0"
/// - "1.2.3" -> "1.2.3.0"
/// - "1.2.3.4" -> "1.2.3.4"
/// - "1.2.3.4.5" -> "1.2.3.4" (truncates to first 4)
///
/// Returns None when a component is not a number ("0.1rc1", "1.0-beta"), since makensis
/// rejects those.
pub fn format_version_for_nsis(version: &str) -> Option<String> {
    let parts: Vec<&str> = version.split('.').take(4).collect();
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let mut padded: Vec<&str> = parts;
    padded.resize(4, "0");
    Some(padded.join("."))
}

/// Installation directory for a directory relative to the package root: `$INSTDIR` plus the
/// directory, with Windows separators.
pub fn install_dir(relative_dir: &Path) -> String {
    if relative_dir.as_os_str().is_empty() {
        "$INSTDIR".to_string()
    } else {
        format!("$INSTDIR\\{}", to_windows_separators(relative_dir))
    }
}

/// Installation directory of a file relative to the package root: [`install_dir`] of its
/// parent.
pub fn install_dir_of(relative: &Path) -> String {
    install_dir(relative.parent().unwrap_or(Path::new("")))
}

/// Path as written in `File` commands: components joined with `/`, whatever the host.
pub fn script_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Path rendered with `\` separators.
pub fn to_windows_separators(path: &Path) -> String {
    path.display().to_string().replace('/', "\\")
}

/// Write file with UTF-8 BOM (required by NSIS).
///
/// NSIS requires installer scripts to be encoded with UTF-8 BOM (byte order mark).
/// This function writes the BOM (EF BB BF) followed by the content.
pub async fn write_utf8_bom(path: &Path, content: &str) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating NSI script file", path)?;

    // Write UTF-8 BOM: EF BB BF
    file.write_all(&[0xEF, 0xBB, 0xBF])
        .await
        .fs_context("writing UTF-8 BOM", path)?;
    file.write_all(content.as_bytes())
        .await
        .fs_context("writing NSI content", path)?;
    file.flush().await.fs_context("flushing NSI file", path)?;

    Ok(())
}
