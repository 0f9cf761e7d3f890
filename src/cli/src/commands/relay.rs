//! Relay command for the payment ledger harness.

use crate::commands::invoke::load_credential;
use crate::config::CliConfig;
use crate::errors::CliError;
use crate::LocalExecutor;
use payment_core::{DebitRelay, RelayReport};
use std::path::Path;
use tracing::info;

/// Runs one pass of the debit relay.
pub fn run<P: AsRef<Path>>(
    executor: &LocalExecutor,
    config: &CliConfig,
    cert_path: P,
    since: u64,
) -> Result<RelayReport, CliError> {
    let credential = load_credential(cert_path)?;
    let relay = DebitRelay::new(executor, credential, config.relay.clone());

    let report = relay.run_once(since)?;
    info!(
        credited = report.credited,
        skipped = report.skipped,
        failed = report.failed,
        cursor = report.cursor,
        "relay pass finished"
    );
    Ok(report)
}
