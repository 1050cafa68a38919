//! conda_nsis_bundler - Windows installers for conda-based Python applications.
//!
//! Reads an installer manifest, builds the installer and prints its path.
//! Exit code 0 means the installer was written.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match conda_nsis_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
