//! Installer manifest loading.
//!
//! The CLI reads one TOML file describing the package, the installer options, optional
//! tool paths and the shortcuts. Relative paths in the manifest resolve against the
//! manifest's own directory, except `include` and `icon`, which are relative to the
//! package root by definition.

use crate::bundler::{
    EnvCreateStrategy, InstallerConfig, InstallerConfigBuilder, Shortcut, ToolOverrides,
};
use crate::error::{CliError, Result};
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parsed installer manifest.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallerManifest {
    /// `[package]`
    pub package: PackageSection,
    /// `[installer]`
    #[serde(default)]
    pub installer: InstallerSection,
    /// `[tools]`
    #[serde(default)]
    pub tools: ToolsSection,
    /// `[[shortcut]]` entries, in file order
    #[serde(default, rename = "shortcut")]
    pub shortcuts: Vec<ShortcutEntry>,
    #[serde(skip)]
    base_dir: PathBuf,
}

/// `[package]`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Application name, used for the install directory and installer file name
    pub name: String,
    /// Application version; non-numeric versions skip `VIProductVersion`
    pub version: Option<String>,
    /// Package root; defaults to the manifest directory
    pub root: Option<PathBuf>,
}

/// `[installer]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallerSection {
    /// Installer executable; defaults to `install_{name}-{version}.exe`
    pub output: Option<PathBuf>,
    /// NSIS `InstallDir` expression
    pub install_dir: Option<String>,
    /// Files and directories to ship, relative to the package root
    #[serde(default)]
    pub include: Vec<PathBuf>,
    /// Installer and shortcut icon, relative to the package root
    pub icon: Option<PathBuf>,
    /// Arguments to the packed Python after installing, one run each, in order
    #[serde(default)]
    pub postinstall_scripts: Vec<String>,
    /// Arguments to the packed Python before uninstalling, one run each, in order
    #[serde(default)]
    pub preuninstall_scripts: Vec<String>,
    /// conda environment file or lock file
    pub env_file: Option<PathBuf>,
    /// Name of the packed environment directory under `$INSTDIR`
    pub env_name: Option<String>,
    /// `env-file` or `conda-lock`
    pub env_strategy: Option<String>,
    /// Whether to `pip install` the package root into the environment
    pub install_root_package: Option<bool>,
    /// Custom NSIS template replacing the built-in one
    pub template: Option<PathBuf>,
    /// Whether to wipe `$INSTDIR` before installing
    pub clean_install_dir: Option<bool>,
    /// Whether to register an uninstaller in Add/Remove Programs
    pub register_uninstaller: Option<bool>,
    /// NSIS compressor: `zlib`, `bzip2` or `lzma`
    pub compression: Option<String>,
}

/// `[tools]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsSection {
    /// conda executable
    pub conda: Option<PathBuf>,
    /// conda-pack executable
    pub conda_pack: Option<PathBuf>,
    /// makensis executable
    pub makensis: Option<PathBuf>,
}

/// `[[shortcut]]`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShortcutEntry {
    /// Start-menu entry name
    pub name: String,
    /// Executable the shortcut launches
    pub target: String,
    /// Command line arguments
    #[serde(default)]
    pub parameters: String,
    /// Icon file; empty for the target's own icon
    #[serde(default)]
    pub icon: String,
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<InstallerManifest> {
    let manifest_path = path.absolutize()?.to_path_buf();
    let content =
        std::fs::read_to_string(&manifest_path).map_err(|error| CliError::ManifestUnreadable {
            path: manifest_path.clone(),
            error,
        })?;

    let base_dir = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    parse_manifest(&content, base_dir)
}

/// Parse manifest text, resolving relative paths against `base_dir`.
pub fn parse_manifest(content: &str, base_dir: impl Into<PathBuf>) -> Result<InstallerManifest> {
    let mut manifest: InstallerManifest = toml::from_str(content)?;
    manifest.base_dir = base_dir.into();
    log::debug!(
        "Loaded manifest for {} ({} shortcuts)",
        manifest.package.name,
        manifest.shortcuts.len()
    );
    Ok(manifest)
}

impl InstallerManifest {
    /// Directory relative paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Builder holding every manifest value. Further overrides can be applied before
    /// [`InstallerConfigBuilder::build`].
    pub fn config_builder(&self) -> Result<InstallerConfigBuilder> {
        let root = match &self.package.root {
            Some(root) => self.resolve(root),
            None => self.base_dir.clone(),
        };
        let section = &self.installer;

        let mut builder = InstallerConfigBuilder::new(&self.package.name, root)
            .include(section.include.iter().cloned())
            .postinstall_python_scripts(section.postinstall_scripts.iter().cloned())
            .preuninstall_python_scripts(section.preuninstall_scripts.iter().cloned())
            .tools(self.tool_overrides());

        if let Some(version) = &self.package.version {
            builder = builder.version(version);
        }
        if let Some(output) = &section.output {
            builder = builder.installer_name(self.resolve(output));
        }
        if let Some(dir) = &section.install_dir {
            builder = builder.default_install_dir(dir);
        }
        if let Some(icon) = &section.icon {
            builder = builder.icon(icon);
        }
        if let Some(env_file) = &section.env_file {
            builder = builder.env_file(self.resolve(env_file));
        }
        if let Some(env_name) = &section.env_name {
            builder = builder.env_name(env_name);
        }
        if let Some(strategy) = &section.env_strategy {
            builder = builder.env_strategy(strategy.parse::<EnvCreateStrategy>()?);
        }
        if let Some(install) = section.install_root_package {
            builder = builder.install_root_package(install);
        }
        if let Some(template) = &section.template {
            builder = builder.nsis_template(self.resolve(template));
        }
        if let Some(clean) = section.clean_install_dir {
            builder = builder.clean_instdir(clean);
        }
        if let Some(register) = section.register_uninstaller {
            builder = builder.register_uninstaller(register);
        }
        if let Some(compression) = &section.compression {
            builder = builder.compression(compression);
        }

        Ok(builder)
    }

    /// `[tools]` entries as overrides.
    pub fn tool_overrides(&self) -> ToolOverrides {
        ToolOverrides {
            conda: self.tools.conda.as_deref().map(|p| self.resolve_tool(p)),
            conda_pack: self.tools.conda_pack.as_deref().map(|p| self.resolve_tool(p)),
            makensis: self.tools.makensis.as_deref().map(|p| self.resolve_tool(p)),
        }
    }

    /// Registers every `[[shortcut]]` on `config`, in file order.
    pub fn apply_shortcuts(&self, config: &mut InstallerConfig) {
        for entry in &self.shortcuts {
            config.push_shortcut(
                Shortcut::new(&entry.name, &entry.target)
                    .parameters(&entry.parameters)
                    .icon_file(&entry.icon),
            );
        }
    }

    /// Builds the complete configuration, shortcuts included.
    pub fn into_config(self) -> Result<InstallerConfig> {
        let mut config = self.config_builder()?.build()?;
        self.apply_shortcuts(&mut config);
        Ok(config)
    }

    /// Tool values that look like paths resolve against the manifest directory; bare
    /// program names are left for `PATH` lookup.
    fn resolve_tool(&self, tool: &Path) -> PathBuf {
        if tool.components().count() > 1 {
            self.resolve(tool)
        } else {
            tool.to_path_buf()
        }
    }
}
