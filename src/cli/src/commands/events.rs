//! Events command for the payment ledger harness.

use crate::errors::CliError;
use crate::LocalExecutor;
use payment_core::{CommittedEvent, StateStore};
use tracing::debug;

/// Runs the events command.
pub fn run(executor: &LocalExecutor, since: u64) -> Result<Vec<CommittedEvent>, CliError> {
    let events = executor.store().events_since(since)?;
    debug!(since, count = events.len(), "listed committed events");
    Ok(events)
}

/// Renders an event payload, falling back to hex when it is not UTF-8.
pub fn display_payload(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("0x{}", hex::encode(payload)),
    }
}
