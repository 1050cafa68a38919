//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that drives the pipeline from an
//! [`InstallerConfig`](crate::bundler::InstallerConfig) to a Windows installer.
//!
//! # Module Organization
//!
//! - [`orchestrator`] - Main [`Bundler`] struct and pipeline stages
//! - [`tool_detection`] - External tool resolution

pub mod orchestrator;
pub mod tool_detection;

pub use orchestrator::Bundler;
pub use tool_detection::Toolchain;
