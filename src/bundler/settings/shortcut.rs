//! Shortcut descriptors written into the installer script.

use serde::Serialize;

/// A shortcut the installer creates on the target machine.
///
/// All fields accept NSIS variables (`$INSTDIR`, `$DESKTOP`, ...) plus the variables the
/// built-in template defines: `$PYTHON`, `$PYTHONW` and `$ENV`. See
/// <https://nsis.sourceforge.io/Reference/CreateShortCut>.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortcut {
    /// Full path of the `.lnk` file on the target machine.
    pub shortcut_name: String,
    /// Executable the shortcut launches.
    pub target_file: String,
    /// Command line parameters for the target.
    pub parameters: String,
    /// `.ico` file on the target machine.
    pub icon_file: String,
}

impl Shortcut {
    /// Creates a shortcut with no parameters and no icon.
    pub fn new(shortcut_name: impl Into<String>, target_file: impl Into<String>) -> Self {
        Self {
            shortcut_name: shortcut_name.into(),
            target_file: target_file.into(),
            parameters: String::new(),
            icon_file: String::new(),
        }
    }

    /// Sets the command line parameters.
    pub fn parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = parameters.into();
        self
    }

    /// Sets the icon.
    pub fn icon_file(mut self, icon_file: impl Into<String>) -> Self {
        self.icon_file = icon_file.into();
        self
    }
}
