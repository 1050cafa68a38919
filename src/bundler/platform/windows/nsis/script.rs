//! NSIS installer script generation.
//!
//! Renders NSI installer scripts from handlebars templates using the installer
//! configuration, then writes them with the UTF-8 BOM NSIS expects.

use super::{template::NSI_TEMPLATE, utils};
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::{IncludeFile, InstallerConfig},
};
use handlebars::Handlebars;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the rendered script inside the staging directory.
pub const SCRIPT_FILE_NAME: &str = "installer.nsi";

/// Template data for `config`, under the `installer` key.
///
/// | Field | Content |
/// |-------|---------|
/// | `package_name`, `package_version` | package metadata (version may be null) |
/// | `version_nsis` | four-part numeric version, null if the version is not numeric |
/// | `installer_name` | absolute output path |
/// | `default_install_dir` | proposed install directory |
/// | `env_name` | environment directory name |
/// | `include_dirs` | objects with `path`, `out_dir`, `directories` (install dirs to create) and `files` |
/// | `include_files` | objects with `path` (relative, `/`-separated) and `out_dir` (`$INSTDIR\...`) |
/// | `icon` | null or object with `path`, `out_dir`, `installed_path` |
/// | `shortcuts` | objects with `shortcut_name`, `target_file`, `parameters`, `icon_file` |
/// | `postinstall_python_scripts`, `preuninstall_python_scripts` | python argument strings |
/// | `compressor` | `zlib`, `bzip2` or `lzma` |
/// | `clean_instdir`, `register_uninstaller` | booleans |
///
/// Included directories are expanded here, so the script names every file explicitly.
/// Entries are sorted by name.
pub fn template_context(config: &InstallerConfig) -> Result<Value> {
    let root = config.package_root();
    let include_dirs = config
        .include_dirs()
        .iter()
        .map(|dir| include_dir_context(root, dir))
        .collect::<Result<Vec<Value>>>()?;

    let include_files: Vec<Value> = config.include_files().iter().map(file_context).collect();

    let icon = config.icon().map(|icon| {
        json!({
            "path": utils::script_path(icon),
            "out_dir": utils::install_dir_of(icon),
            "installed_path": format!("$INSTDIR\\{}", utils::to_windows_separators(icon)),
        })
    });

    Ok(json!({
        "installer": {
            "package_name": config.package_name(),
            "package_version": config.package_version(),
            "version_nsis": config.package_version().and_then(utils::format_version_for_nsis),
            "installer_name": config.installer_name().display().to_string(),
            "default_install_dir": config.default_install_dir(),
            "env_name": config.env_name(),
            "include_dirs": include_dirs,
            "include_files": include_files,
            "icon": icon,
            "shortcuts": config.shortcuts(),
            "postinstall_python_scripts": config.postinstall_python_scripts(),
            "preuninstall_python_scripts": config.preuninstall_python_scripts(),
            "compressor": config.compression().as_str(),
            "clean_instdir": config.clean_instdir(),
            "register_uninstaller": config.register_uninstaller(),
        }
    }))
}

fn file_context(file: &IncludeFile) -> Value {
    json!({
        "path": utils::script_path(&file.path),
        "out_dir": utils::install_dir(&file.parent),
    })
}

/// Walks `root/dir` and lists every directory and file below it, relative to `root`.
fn include_dir_context(root: &Path, dir: &Path) -> Result<Value> {
    let mut directories = Vec::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(root.join(dir)).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(root)?;
        if entry.file_type().is_dir() {
            directories.push(utils::install_dir(relative));
        } else if entry.path().is_file() {
            files.push(file_context(&IncludeFile::new(relative)));
        }
    }

    Ok(json!({
        "path": utils::script_path(dir),
        "out_dir": utils::install_dir(dir),
        "directories": directories,
        "files": files,
    }))
}

/// Renders `template` against the configuration.
pub fn render_template(config: &InstallerConfig, template: &str) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string(SCRIPT_FILE_NAME, template)
        .map_err(|e| Error::Template(format!("failed to register NSI template: {}", e)))?;

    handlebars
        .render(SCRIPT_FILE_NAME, &template_context(config)?)
        .map_err(|e| Error::Template(format!("failed to render NSI template: {}", e)))
}

/// Renders the installer script into `staging_dir/installer.nsi`.
///
/// Uses the configured template if there is one, the built-in template otherwise.
/// Include and shortcut loops belong to the template; the output only depends on the
/// configuration and the state of the package root.
///
/// # Returns
/// Path to the generated installer.nsi file
pub async fn render_script(config: &InstallerConfig, staging_dir: &Path) -> Result<PathBuf> {
    let template = match config.nsis_template() {
        Some(path) => {
            log::debug!("Using NSIS template {}", path.display());
            tokio::fs::read_to_string(path)
                .await
                .fs_context("reading NSIS template", path)?
        }
        None => NSI_TEMPLATE.to_string(),
    };

    let nsi_content = render_template(config, &template)?;

    let nsi_path = staging_dir.join(SCRIPT_FILE_NAME);
    utils::write_utf8_bom(&nsi_path, &nsi_content).await?;
    log::debug!("Wrote {}", nsi_path.display());

    Ok(nsi_path)
}
