//! Init-config command for the payment ledger harness.

use crate::config::CliConfig;
use crate::errors::CliError;
use std::path::Path;
use tracing::info;

/// Writes a default configuration file.
pub fn run<P: AsRef<Path>>(path: P) -> Result<(), CliError> {
    if path.as_ref().exists() {
        return Err(CliError::FileError(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.as_ref().display()),
        )));
    }

    let contents = serde_json::to_string_pretty(&CliConfig::default())?;
    std::fs::write(path.as_ref(), contents)?;
    info!("Configuration written to {}", path.as_ref().display());
    Ok(())
}
