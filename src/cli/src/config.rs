//! Configuration for the CLI harness.

use crate::errors::CliError;
use anyhow::Result;
use payment_core::{AssetRegistry, ContractConfig, LedgerKey, RelayConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for the CLI harness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Path to the data directory
    pub data_dir: Option<PathBuf>,
    /// Contract configuration
    pub contract: ContractConfig,
    /// Debit relay configuration
    pub relay: RelayConfig,
    /// Asset owners served by the local ownership contract
    pub assets: BTreeMap<String, String>,
}

impl CliConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Builds the local ownership contract from the configured assets.
    pub fn registry(&self) -> Result<AssetRegistry, CliError> {
        let mut registry = AssetRegistry::new(self.contract.ownership.clone());
        for (asset, owner) in &self.assets {
            let owner = LedgerKey::parse(owner.as_bytes())
                .map_err(|reason| CliError::InvalidAsset(format!("{}: {}", asset, reason)))?;
            registry.register(asset.clone(), owner);
        }
        Ok(registry)
    }
}
