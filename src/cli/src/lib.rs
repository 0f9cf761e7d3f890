//! Local harness for the payment ledger contract.
//!
//! Runs the contract against a RocksDB store in the data directory, with
//! the ownership contract served from the configured asset table.

pub mod commands;
pub mod config;
pub mod errors;

pub use config::CliConfig;
pub use errors::CliError;

use payment_core::{AssetRegistry, ContractOwnership, Executor, PaymentContract};
use payment_storage::RocksStore;
use std::path::Path;
use tracing::debug;

/// An executor over the local store and the local ownership contract.
pub type LocalExecutor = Executor<RocksStore, ContractOwnership<AssetRegistry>>;

/// Opens the store under `data_dir` and wires the contract to it.
pub fn open_executor<P: AsRef<Path>>(
    config: &CliConfig,
    data_dir: P,
) -> Result<LocalExecutor, CliError> {
    std::fs::create_dir_all(data_dir.as_ref())?;
    let store = RocksStore::open(data_dir.as_ref().join("ledger"))?;

    let registry = config.registry()?;
    debug!(assets = config.assets.len(), "loaded asset registry");

    let ownership = ContractOwnership::new(registry, config.contract.ownership.clone());
    let contract = PaymentContract::new(ownership, config.contract.clone());
    Ok(Executor::new(store, contract))
}
