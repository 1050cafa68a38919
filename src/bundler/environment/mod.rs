//! Conda environment stages.
//!
//! - `create` - materializes the environment from the spec file and installs the runtime hook
//! - `pack` - packs it with conda-pack, unpacks into staging, removes the temporary prefix
//! - `runtime_hook` - the `sitecustomize.py` written into the environment

mod create;
mod pack;
mod runtime_hook;

pub use create::{create_environment, python_executable, site_packages};
pub use pack::{pack_environment, packed_archive_path, remove_environment};
pub use runtime_hook::SITECUSTOMIZE;
