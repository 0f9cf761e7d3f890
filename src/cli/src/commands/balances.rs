//! Balances command for the payment ledger harness.

use crate::errors::CliError;
use crate::LocalExecutor;

/// Runs the balances command, returning every stored balance as text.
pub fn run(executor: &LocalExecutor) -> Result<Vec<(String, String)>, CliError> {
    let entries = executor.store().entries()?;
    Ok(entries
        .into_iter()
        .map(|(key, value)| (key, String::from_utf8_lossy(&value).into_owned()))
        .collect())
}
