//! Explicit paths for the external tools.

use std::path::PathBuf;

/// Optional explicit locations of the external tools.
///
/// Unset entries are resolved when a [`Bundler`](crate::bundler::Bundler) is constructed:
/// first from the environment (`CONDA_EXE`, `CONDA_PACK_EXE`, `MAKENSIS_EXE`), then from
/// `PATH`.
#[derive(Clone, Debug, Default)]
pub struct ToolOverrides {
    /// conda executable.
    pub conda: Option<PathBuf>,
    /// conda-pack executable.
    pub conda_pack: Option<PathBuf>,
    /// makensis executable.
    pub makensis: Option<PathBuf>,
}
