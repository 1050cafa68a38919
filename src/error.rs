//! Error types for the command line front end.
//!
//! Pipeline failures are [`crate::bundler::Error`]; this module wraps them together with
//! argument, manifest and IO errors for the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// The installer manifest could not be read
    #[error("Failed to read manifest {}: {error}", .path.display())]
    ManifestUnreadable {
        /// Manifest path
        path: PathBuf,
        /// Underlying error
        error: std::io::Error,
    },
}

impl BundlerError {
    /// True when the error comes from invalid input rather than a failing build step.
    pub fn is_validation(&self) -> bool {
        match self {
            BundlerError::Cli(_) | BundlerError::Toml(_) => true,
            BundlerError::Bundler(e) => e.is_validation(),
            _ => false,
        }
    }
}
