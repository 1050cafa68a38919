//! Core InstallerConfig struct and implementations.

use super::{EnvCreateStrategy, NsisCompression, PackageSettings, Shortcut, ToolOverrides};
use std::path::{Path, PathBuf};

/// Validated configuration for one installer build.
///
/// Constructed via [`InstallerConfigBuilder`](super::InstallerConfigBuilder). Every field is
/// fixed after construction except the shortcut list, which grows through
/// [`add_shortcut`](Self::add_shortcut).
///
/// # Examples
///
/// ```no_run
/// use conda_nsis_bundler::bundler::InstallerConfigBuilder;
///
/// # fn example() -> conda_nsis_bundler::bundler::Result<()> {
/// let mut config = InstallerConfigBuilder::new("snake-simulator", ".")
///     .version("0.1")
///     .include(["snake.py"])
///     .install_root_package(false)
///     .build()?;
///
/// config.add_shortcut(r"$INSTDIR\snake.lnk", "$PYTHON", r"$INSTDIR\snake.py", "");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct InstallerConfig {
    /// Package metadata, with an absolute root.
    pub(super) package: PackageSettings,

    /// Absolute path of the installer the compiler writes.
    pub(super) installer_name: PathBuf,

    /// Install directory proposed on the target machine. Accepts NSIS variables.
    pub(super) default_install_dir: String,

    /// Files and directories to bundle, relative to the package root.
    pub(super) include: Vec<PathBuf>,

    /// Installer icon, relative to the package root.
    pub(super) icon: Option<PathBuf>,

    /// Python commands run on the target machine after installation.
    pub(super) postinstall_python_scripts: Vec<String>,

    /// Python commands run on the target machine before uninstall.
    pub(super) preuninstall_python_scripts: Vec<String>,

    /// Environment spec file. Guaranteed to exist at construction time.
    pub(super) env_file: PathBuf,

    /// Name of the environment directory on the target machine.
    pub(super) env_name: String,

    /// Command used to create the environment.
    pub(super) env_strategy: EnvCreateStrategy,

    /// Whether to `pip install` the package root into the environment.
    pub(super) install_root_package: bool,

    /// Custom template. None means the built-in one.
    pub(super) nsis_template: Option<PathBuf>,

    /// Remove the install directory before installing.
    pub(super) clean_instdir: bool,

    /// Register the uninstaller in "Add or remove programs".
    pub(super) register_uninstaller: bool,

    /// Payload compression.
    pub(super) compression: NsisCompression,

    /// Explicit tool locations.
    pub(super) tools: ToolOverrides,

    /// Shortcuts, in registration order.
    pub(super) shortcuts: Vec<Shortcut>,
}

/// An included file as seen by the installer script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncludeFile {
    /// Path relative to the package root (and to the staging directory).
    pub path: PathBuf,
    /// Parent directory of `path`, empty for files at the root.
    pub parent: PathBuf,
}

impl IncludeFile {
    /// File at `path`, relative to the package root.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self { path, parent }
    }
}

impl InstallerConfig {
    /// Returns the package name.
    pub fn package_name(&self) -> &str {
        &self.package.name
    }

    /// Returns the package version, if any.
    pub fn package_version(&self) -> Option<&str> {
        self.package.version.as_deref()
    }

    /// Returns the absolute package root.
    pub fn package_root(&self) -> &Path {
        &self.package.root
    }

    /// Returns the absolute installer output path.
    pub fn installer_name(&self) -> &Path {
        &self.installer_name
    }

    /// Returns the default install directory on the target machine.
    pub fn default_install_dir(&self) -> &str {
        &self.default_install_dir
    }

    /// Returns the declared includes, in declaration order.
    pub fn include(&self) -> &[PathBuf] {
        &self.include
    }

    /// Declared includes that are directories under the package root.
    ///
    /// Checked against the filesystem on every call.
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        self.include
            .iter()
            .filter(|p| self.package.root.join(p).is_dir())
            .cloned()
            .collect()
    }

    /// Declared includes that are files under the package root.
    ///
    /// Checked against the filesystem on every call.
    pub fn include_files(&self) -> Vec<IncludeFile> {
        self.include
            .iter()
            .filter(|p| self.package.root.join(p).is_file())
            .map(IncludeFile::new)
            .collect()
    }

    /// Returns the installer icon, relative to the package root.
    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    /// Returns the post-install python commands.
    pub fn postinstall_python_scripts(&self) -> &[String] {
        &self.postinstall_python_scripts
    }

    /// Returns the pre-uninstall python commands.
    pub fn preuninstall_python_scripts(&self) -> &[String] {
        &self.preuninstall_python_scripts
    }

    /// Returns the environment spec file.
    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    /// Returns the environment name on the target machine.
    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    /// Returns the environment creation strategy.
    pub fn env_strategy(&self) -> EnvCreateStrategy {
        self.env_strategy
    }

    /// Whether the package root is pip-installed into the environment.
    pub fn install_root_package(&self) -> bool {
        self.install_root_package
    }

    /// Returns the custom template path, if any.
    pub fn nsis_template(&self) -> Option<&Path> {
        self.nsis_template.as_deref()
    }

    /// Whether the install directory is cleaned before installing.
    pub fn clean_instdir(&self) -> bool {
        self.clean_instdir
    }

    /// Whether the uninstaller is registered with Windows.
    pub fn register_uninstaller(&self) -> bool {
        self.register_uninstaller
    }

    /// Returns the payload compression.
    pub fn compression(&self) -> NsisCompression {
        self.compression
    }

    /// Returns the explicit tool locations.
    pub fn tools(&self) -> &ToolOverrides {
        &self.tools
    }

    /// Returns the registered shortcuts, in registration order.
    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// Adds a shortcut to be created by the installer.
    ///
    /// The target is not checked: it usually only exists on the target machine.
    /// Empty `parameters` and `icon` mean none.
    pub fn add_shortcut(
        &mut self,
        shortcut_name: impl Into<String>,
        target_file: impl Into<String>,
        parameters: impl Into<String>,
        icon_file: impl Into<String>,
    ) {
        self.push_shortcut(
            Shortcut::new(shortcut_name, target_file)
                .parameters(parameters)
                .icon_file(icon_file),
        );
    }

    /// Adds a prebuilt shortcut.
    pub fn push_shortcut(&mut self, shortcut: Shortcut) {
        log::debug!(
            "Registering shortcut {} -> {}",
            shortcut.shortcut_name,
            shortcut.target_file
        );
        self.shortcuts.push(shortcut);
    }
}
