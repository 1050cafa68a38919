//! Error types for bundling operations.
//!
//! Validation errors are raised while building an [`InstallerConfig`](super::InstallerConfig),
//! everything else while the pipeline runs. Cleanup failures are never errors; they are logged.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the bundling pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// A file required at configuration time does not exist.
    #[error("could not find {what} at {}", .path.display())]
    MissingFile {
        /// What the file was supposed to be
        what: &'static str,
        /// Path that was checked
        path: PathBuf,
    },

    /// A configuration option has a value outside its accepted set.
    #[error("invalid value {value:?} for {option}: {reason}")]
    InvalidOption {
        /// Option name
        option: &'static str,
        /// Rejected value
        value: String,
        /// Accepted values or constraint
        reason: String,
    },

    /// A declared include path is neither a file nor a directory.
    #[error("could not find {}", .path.display())]
    MissingSource {
        /// Absolute source path that was looked up
        path: PathBuf,
    },

    /// An external tool ran and exited unsuccessfully.
    #[error("`{command}` failed with {}", describe_exit(.code))]
    SubprocessFailed {
        /// Command line that was run
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// An external tool could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program that was spawned
        command: String,
        /// Spawn error
        error: std::io::Error,
    },

    /// Template registration or rendering failed.
    #[error("template error: {0}")]
    Template(String),

    /// Filesystem operation failed.
    #[error("{context} ({}): {error}", .path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: std::io::Error,
    },

    /// IO error without path context.
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix error while mapping staged paths.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Error with added context.
    #[error("{context}: {source}")]
    Context {
        /// Description of the operation that failed
        context: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// Generic error.
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl Error {
    /// True for errors raised while validating configuration.
    pub fn is_validation(&self) -> bool {
        match self {
            Error::MissingFile { .. } | Error::InvalidOption { .. } => true,
            Error::Context { source, .. } => source.is_validation(),
            _ => false,
        }
    }

    /// Strips any [`Error::Context`] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Maps an IO error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attach a description to an error or a missing value.
pub trait Context<T> {
    /// Wraps the error with a static description.
    fn context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Wraps the error with a lazily built description.
    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|source| Error::Context {
            context: context.into(),
            source: Box::new(source),
        })
    }

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|source| Error::Context {
            context: f().into(),
            source: Box::new(source),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.into()))
    }

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().into()))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subprocess_failure_message_includes_exit_code() {
        let err = Error::SubprocessFailed {
            command: "makensis installer.nsi".into(),
            code: Some(1),
        };
        assert_eq!(
            err.to_string(),
            "`makensis installer.nsi` failed with exit code 1"
        );
    }

    #[test]
    fn context_preserves_validation_class() {
        let err: Result<()> = Err(Error::MissingFile {
            what: "environment file",
            path: PathBuf::from("nope.yml"),
        });
        let err = err.context("loading manifest").unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err.root(), Error::MissingFile { .. }));
    }

    #[test]
    fn fs_context_names_path() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = res.fs_context("reading template", "a/b.nsi").unwrap_err();
        assert!(err.to_string().contains("reading template"));
        assert!(err.to_string().contains("b.nsi"));
    }
}
