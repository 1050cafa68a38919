//! Built-in NSI script template.
//!
//! Rendered by handlebars with HTML escaping disabled. Everything lives under the
//! `installer` key; see [`template_context`](super::script::template_context) for the
//! available fields. Custom templates can use the same fields.
//!
//! Shortcut targets and parameters may use `$PYTHON`, `$PYTHONW` and `$ENV`, which the
//! `SET_PYTHON_VARS` macro fills in before shortcuts and scripts run.

/// Default installer script template.
pub const NSI_TEMPLATE: &str = r#"; {{installer.package_name}} installer script, generated by conda_nsis_bundler
Unicode true
SetCompressor /SOLID {{installer.compressor}}

!define PRODUCT "{{installer.package_name}}"
!define ENV_DIR "{{installer.env_name}}"
!define UNINST_KEY "Software\Microsoft\Windows\CurrentVersion\Uninstall\${PRODUCT}"

Name "${PRODUCT}{{#if installer.package_version}} {{installer.package_version}}{{/if}}"
OutFile "{{installer.installer_name}}"
InstallDir "{{installer.default_install_dir}}"
RequestExecutionLevel user
ShowInstDetails show
ShowUninstDetails show
{{#if installer.icon}}
Icon "{{installer.icon.path}}"
UninstallIcon "{{installer.icon.path}}"
{{/if}}
{{#if installer.version_nsis}}
VIProductVersion "{{installer.version_nsis}}"
VIAddVersionKey "ProductName" "${PRODUCT}"
VIAddVersionKey "ProductVersion" "{{installer.package_version}}"
VIAddVersionKey "FileVersion" "{{installer.package_version}}"
VIAddVersionKey "FileDescription" "${PRODUCT} installer"
{{/if}}

!include "MUI2.nsh"
!insertmacro MUI_PAGE_DIRECTORY
!insertmacro MUI_PAGE_INSTFILES
!insertmacro MUI_UNPAGE_CONFIRM
!insertmacro MUI_UNPAGE_INSTFILES
!insertmacro MUI_LANGUAGE "English"

Var PYTHON
Var PYTHONW
Var ENV

!macro SET_PYTHON_VARS
  StrCpy $ENV "${ENV_DIR}"
  StrCpy $PYTHON "$INSTDIR\${ENV_DIR}\python.exe"
  StrCpy $PYTHONW "$INSTDIR\${ENV_DIR}\pythonw.exe"
!macroend

Section "Install"
{{#if installer.clean_instdir}}
  RMDir /r "$INSTDIR"
{{/if}}
  !insertmacro SET_PYTHON_VARS

  SetOutPath "$INSTDIR\${ENV_DIR}"
  File /r "${ENV_DIR}\*.*"
{{#each installer.include_dirs}}
{{#each this.directories}}
  CreateDirectory "{{this}}"
{{/each}}
{{#each this.files}}
  SetOutPath "{{this.out_dir}}"
  File "{{this.path}}"
{{/each}}
{{/each}}
{{#each installer.include_files}}
  SetOutPath "{{this.out_dir}}"
  File "{{this.path}}"
{{/each}}
{{#if installer.icon}}
  SetOutPath "{{installer.icon.out_dir}}"
  File "{{installer.icon.path}}"
{{/if}}

  SetOutPath "$INSTDIR"
  WriteUninstaller "$INSTDIR\uninstall.exe"
{{#each installer.shortcuts}}
  CreateShortCut "{{this.shortcut_name}}" "{{this.target_file}}" "{{this.parameters}}"{{#if this.icon_file}} "{{this.icon_file}}"{{/if}}
{{/each}}
{{#each installer.postinstall_python_scripts}}
  ExecWait '"$PYTHON" {{this}}'
{{/each}}
{{#if installer.register_uninstaller}}

  WriteRegStr HKCU "${UNINST_KEY}" "DisplayName" "${PRODUCT}"
  WriteRegStr HKCU "${UNINST_KEY}" "UninstallString" '"$INSTDIR\uninstall.exe"'
  WriteRegStr HKCU "${UNINST_KEY}" "InstallLocation" "$INSTDIR"
{{#if installer.package_version}}
  WriteRegStr HKCU "${UNINST_KEY}" "DisplayVersion" "{{installer.package_version}}"
{{/if}}
{{#if installer.icon}}
  WriteRegStr HKCU "${UNINST_KEY}" "DisplayIcon" "{{installer.icon.installed_path}}"
{{/if}}
  WriteRegDWORD HKCU "${UNINST_KEY}" "NoModify" 1
  WriteRegDWORD HKCU "${UNINST_KEY}" "NoRepair" 1
{{/if}}
SectionEnd

Section "Uninstall"
  !insertmacro SET_PYTHON_VARS
{{#each installer.preuninstall_python_scripts}}
  ExecWait '"$PYTHON" {{this}}'
{{/each}}
  RMDir /r "$INSTDIR"
{{#if installer.register_uninstaller}}
  DeleteRegKey HKCU "${UNINST_KEY}"
{{/if}}
SectionEnd
"#;
