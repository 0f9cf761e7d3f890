//! Configuration for the payment contract.

use crate::types::Balance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the payment contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Where credit looks up asset owners
    pub ownership: OwnershipConfig,
    /// What credit does when a balance would overflow
    pub overflow: OverflowPolicy,
}

/// Address of the ownership contract queried by credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipConfig {
    /// The contract name
    pub contract: String,
    /// The function queried on the contract
    pub function: String,
    /// The channel the contract is deployed on
    pub channel: String,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            contract: "ownership".to_string(),
            function: "query".to_string(),
            channel: "common".to_string(),
        }
    }
}

/// Behaviour of credit when the new balance does not fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Fail the credit with a balance overflow error
    #[default]
    Reject,
    /// Clamp the balance at the maximum
    Saturate,
}

/// Configuration for the debit relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Amount credited per asset
    pub prices: BTreeMap<String, Balance>,
    /// Amount credited for assets missing from `prices`
    pub default_price: Option<Balance>,
}

impl RelayConfig {
    /// The amount to credit for a debit of `asset`.
    pub fn price_of(&self, asset: &str) -> Option<Balance> {
        self.prices.get(asset).copied().or(self.default_price)
    }
}
