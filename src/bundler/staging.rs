//! Copies application files into the staging directory.

use crate::bundler::{
    error::{Error, Result},
    settings::InstallerConfig,
    utils::fs,
};
use std::path::Path;

/// Copies every declared include, then the icon, from the package root into `staging_dir`.
///
/// Each path keeps its location relative to the package root. Directories are merged into
/// whatever already exists at the destination. Processing stops at the first path that is
/// neither a file nor a directory, with [`Error::MissingSource`].
pub async fn stage_assets(config: &InstallerConfig, staging_dir: &Path) -> Result<()> {
    let root = config.package_root();

    for relative in config.include().iter().map(|p| p.as_path()).chain(config.icon()) {
        let source = root.join(relative);
        let destination = staging_dir.join(relative);

        if source.is_dir() {
            log::debug!("Staging directory {}", relative.display());
            fs::copy_dir(&source, &destination).await?;
        } else if source.is_file() {
            log::debug!("Staging file {}", relative.display());
            fs::copy_file(&source, &destination).await?;
        } else {
            return Err(Error::MissingSource { path: source });
        }
    }

    Ok(())
}
