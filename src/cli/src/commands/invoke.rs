//! Invoke command for the payment ledger harness.

use crate::errors::CliError;
use crate::LocalExecutor;
use payment_core::{Credential, Receipt};
use std::path::Path;
use tracing::{debug, info};

/// Reads a credential from a PEM file.
pub fn load_credential<P: AsRef<Path>>(path: P) -> Result<Credential, CliError> {
    let bytes = std::fs::read(path.as_ref())?;
    debug!(path = %path.as_ref().display(), len = bytes.len(), "read credential");
    Ok(Credential::new(bytes))
}

/// Runs the invoke command.
pub fn run<P: AsRef<Path>>(
    executor: &LocalExecutor,
    cert_path: P,
    function: &str,
    args: Vec<String>,
) -> Result<Receipt, CliError> {
    let credential = load_credential(cert_path)?;
    let receipt = executor.submit(&credential, function, args)?;
    info!(
        tx_id = %receipt.tx_id,
        status = receipt.response.status,
        committed = receipt.committed,
        "invocation finished"
    );
    Ok(receipt)
}
