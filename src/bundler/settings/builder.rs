//! Builder for constructing InstallerConfig.

use super::{
    EnvCreateStrategy, InstallerConfig, NsisCompression, PackageSettings, ToolOverrides,
};
use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`InstallerConfig`].
///
/// Every optional field has a default, applied by [`build`](Self::build):
///
/// | Field | Default |
/// |-------|---------|
/// | `installer_name` | `install_{name}-{version}.exe` in the current directory |
/// | `default_install_dir` | `$PROFILE\{name}` |
/// | `env_file` | `{root}/environment.yml` |
/// | `env_name` | `{name}_env` |
/// | `env_strategy` | [`EnvCreateStrategy::EnvFile`] |
/// | `install_root_package` | `true` |
/// | `nsis_template` | built-in template |
/// | `clean_instdir` | `false` |
/// | `register_uninstaller` | `true` |
/// | `compression` | `"lzma"` |
///
/// # Examples
///
/// ```no_run
/// use conda_nsis_bundler::bundler::InstallerConfigBuilder;
///
/// # fn example() -> conda_nsis_bundler::bundler::Result<()> {
/// let config = InstallerConfigBuilder::new("snake-simulator", "examples/snake")
///     .version("0.2")
///     .include(["snake.py", "assets"])
///     .env_file("examples/snake/conda-win-64.lock")
///     .compression("bzip2")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InstallerConfigBuilder {
    name: String,
    root: PathBuf,
    version: Option<String>,
    installer_name: Option<PathBuf>,
    default_install_dir: Option<String>,
    include: Vec<PathBuf>,
    icon: Option<PathBuf>,
    postinstall_python_scripts: Vec<String>,
    preuninstall_python_scripts: Vec<String>,
    env_file: Option<PathBuf>,
    env_name: Option<String>,
    env_strategy: EnvCreateStrategy,
    install_root_package: Option<bool>,
    nsis_template: Option<PathBuf>,
    clean_instdir: bool,
    register_uninstaller: Option<bool>,
    compression: Option<String>,
    tools: ToolOverrides,
}

impl InstallerConfigBuilder {
    /// Creates a builder for the package `name` rooted at `root`.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Sets the package version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the installer output path. Relative paths resolve against the current directory.
    pub fn installer_name(mut self, path: impl AsRef<Path>) -> Self {
        self.installer_name = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the default install directory. Accepts NSIS variables.
    pub fn default_install_dir(mut self, dir: impl Into<String>) -> Self {
        self.default_install_dir = Some(dir.into());
        self
    }

    /// Sets the files and directories to bundle, relative to the package root.
    pub fn include<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the installer icon, relative to the package root.
    pub fn icon(mut self, icon: impl AsRef<Path>) -> Self {
        self.icon = Some(icon.as_ref().to_path_buf());
        self
    }

    /// Sets the python commands run after installation.
    pub fn postinstall_python_scripts<I, S>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.postinstall_python_scripts = scripts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the python commands run before uninstall.
    pub fn preuninstall_python_scripts<I, S>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preuninstall_python_scripts = scripts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the environment spec file.
    pub fn env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the environment directory name on the target machine.
    pub fn env_name(mut self, name: impl Into<String>) -> Self {
        self.env_name = Some(name.into());
        self
    }

    /// Sets how the environment is created from the spec file.
    pub fn env_strategy(mut self, strategy: EnvCreateStrategy) -> Self {
        self.env_strategy = strategy;
        self
    }

    /// Sets whether the package root is pip-installed into the environment.
    pub fn install_root_package(mut self, install: bool) -> Self {
        self.install_root_package = Some(install);
        self
    }

    /// Sets a custom handlebars template for the installer script.
    pub fn nsis_template(mut self, path: impl AsRef<Path>) -> Self {
        self.nsis_template = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets whether the install directory is removed before installing.
    pub fn clean_instdir(mut self, clean: bool) -> Self {
        self.clean_instdir = clean;
        self
    }

    /// Sets whether the uninstaller is registered with Windows.
    pub fn register_uninstaller(mut self, register: bool) -> Self {
        self.register_uninstaller = Some(register);
        self
    }

    /// Sets the compression algorithm: `zlib`, `bzip2` or `lzma`.
    ///
    /// Checked by [`build`](Self::build).
    pub fn compression(mut self, compression: impl Into<String>) -> Self {
        self.compression = Some(compression.into());
        self
    }

    /// Sets explicit tool locations.
    pub fn tools(mut self, tools: ToolOverrides) -> Self {
        self.tools = tools;
        self
    }

    /// Validates the inputs and builds the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOption`] if the name is empty or the compression is unknown
    /// - [`Error::MissingFile`] if the environment spec file does not exist
    pub fn build(self) -> Result<InstallerConfig> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidOption {
                option: "package_name",
                value: self.name,
                reason: "must not be empty".to_string(),
            });
        }

        let root = absolute(&self.root)?;

        let installer_name = match self.installer_name {
            Some(path) => absolute(&path)?,
            None => absolute(Path::new(&default_installer_file_name(
                &self.name,
                self.version.as_deref(),
            )))?,
        };

        let env_file = match self.env_file {
            Some(path) => absolute(&path)?,
            None => root.join("environment.yml"),
        };
        if !env_file.is_file() {
            return Err(Error::MissingFile {
                what: "environment file",
                path: env_file,
            });
        }

        let compression = match self.compression {
            Some(value) => value.parse::<NsisCompression>()?,
            None => NsisCompression::default(),
        };

        let default_install_dir = self
            .default_install_dir
            .unwrap_or_else(|| format!("$PROFILE\\{}", self.name));
        let env_name = self
            .env_name
            .unwrap_or_else(|| format!("{}_env", self.name));

        Ok(InstallerConfig {
            package: PackageSettings {
                name: self.name,
                version: self.version,
                root,
            },
            installer_name,
            default_install_dir,
            include: self.include,
            icon: self.icon,
            postinstall_python_scripts: self.postinstall_python_scripts,
            preuninstall_python_scripts: self.preuninstall_python_scripts,
            env_file,
            env_name,
            env_strategy: self.env_strategy,
            install_root_package: self.install_root_package.unwrap_or(true),
            nsis_template: self.nsis_template,
            clean_instdir: self.clean_instdir,
            register_uninstaller: self.register_uninstaller.unwrap_or(true),
            compression,
            tools: self.tools,
            shortcuts: Vec::new(),
        })
    }
}

/// `install_{name}-{version}.exe`, or `install_{name}.exe` without a version.
fn default_installer_file_name(name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("install_{name}-{version}.exe"),
        None => format!("install_{name}.exe"),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving absolute path", path)?
        .into_owned())
}
