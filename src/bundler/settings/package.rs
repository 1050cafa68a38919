//! Package metadata.

use std::path::PathBuf;

/// Package metadata for the application being packaged.
///
/// # Examples
///
/// ```no_run
/// use conda_nsis_bundler::bundler::PackageSettings;
///
/// let package = PackageSettings {
///     name: "snake-simulator".into(),
///     version: Some("0.1".into()),
///     root: ".".into(),
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Package name.
    ///
    /// Used for the default installer file name, environment name and install directory.
    pub name: String,

    /// Package version.
    ///
    /// Default: None
    pub version: Option<String>,

    /// Package root. Include paths, the icon and the default environment file are
    /// resolved against it.
    pub root: PathBuf,
}
