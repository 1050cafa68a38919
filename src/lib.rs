//! Windows installer bundler for conda-based Python applications
//!
//! Packs a conda environment with conda-pack, stages the application next to it and
//! compiles a self-contained NSIS installer.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
