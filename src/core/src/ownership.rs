//! Resolution of asset owners through the ownership contract.

use crate::config::OwnershipConfig;
use crate::errors::OwnershipError;
use crate::types::{LedgerKey, Response, Status};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Resolves the ledger key of whoever owns an asset.
pub trait OwnershipResolver {
    /// Returns the owner's ledger key for `asset_key`.
    fn resolve_owner(&self, asset_key: &str) -> Result<LedgerKey, OwnershipError>;
}

impl<T: OwnershipResolver + ?Sized> OwnershipResolver for &T {
    fn resolve_owner(&self, asset_key: &str) -> Result<LedgerKey, OwnershipError> {
        (**self).resolve_owner(asset_key)
    }
}

impl<T: OwnershipResolver + ?Sized> OwnershipResolver for Arc<T> {
    fn resolve_owner(&self, asset_key: &str) -> Result<LedgerKey, OwnershipError> {
        (**self).resolve_owner(asset_key)
    }
}

/// Invokes a function on another contract.
///
/// `args` holds the function name followed by its arguments.
pub trait ChaincodeInvoker {
    /// Invokes `contract` on `channel` and returns its response.
    fn invoke_chaincode(&self, contract: &str, args: &[Vec<u8>], channel: &str) -> Response;
}

impl<T: ChaincodeInvoker + ?Sized> ChaincodeInvoker for &T {
    fn invoke_chaincode(&self, contract: &str, args: &[Vec<u8>], channel: &str) -> Response {
        (**self).invoke_chaincode(contract, args, channel)
    }
}

impl<T: ChaincodeInvoker + ?Sized> ChaincodeInvoker for Arc<T> {
    fn invoke_chaincode(&self, contract: &str, args: &[Vec<u8>], channel: &str) -> Response {
        (**self).invoke_chaincode(contract, args, channel)
    }
}

/// Resolves owners by querying the ownership contract.
#[derive(Debug, Clone)]
pub struct ContractOwnership<I> {
    invoker: I,
    config: OwnershipConfig,
}

impl<I: ChaincodeInvoker> ContractOwnership<I> {
    /// Creates a resolver that queries the contract described by `config`.
    pub fn new(invoker: I, config: OwnershipConfig) -> Self {
        Self { invoker, config }
    }
}

impl<I: ChaincodeInvoker> OwnershipResolver for ContractOwnership<I> {
    fn resolve_owner(&self, asset_key: &str) -> Result<LedgerKey, OwnershipError> {
        let args = vec![
            self.config.function.as_bytes().to_vec(),
            asset_key.as_bytes().to_vec(),
        ];
        let response =
            self.invoker
                .invoke_chaincode(&self.config.contract, &args, &self.config.channel);

        if !response.is_ok() {
            return Err(OwnershipError::Rejected {
                asset: asset_key.to_string(),
                status: response.status,
                message: response.message,
            });
        }

        if response.payload.is_empty() {
            return Err(OwnershipError::MalformedOwner {
                asset: asset_key.to_string(),
                reason: "empty payload".to_string(),
            });
        }

        let owner = LedgerKey::parse(&response.payload).map_err(|reason| {
            OwnershipError::MalformedOwner {
                asset: asset_key.to_string(),
                reason,
            }
        })?;

        debug!(asset = asset_key, owner = %owner, "resolved asset owner");
        Ok(owner)
    }
}

/// An in-memory ownership contract mapping assets to their owners.
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    config: OwnershipConfig,
    owners: BTreeMap<String, LedgerKey>,
}

impl AssetRegistry {
    /// Creates an empty registry answering at the address in `config`.
    pub fn new(config: OwnershipConfig) -> Self {
        Self {
            config,
            owners: BTreeMap::new(),
        }
    }

    /// Records `owner` as the owner of `asset`.
    pub fn register(&mut self, asset: impl Into<String>, owner: LedgerKey) {
        self.owners.insert(asset.into(), owner);
    }

    /// The owner of `asset`, if registered.
    pub fn owner_of(&self, asset: &str) -> Option<&LedgerKey> {
        self.owners.get(asset)
    }
}

impl ChaincodeInvoker for AssetRegistry {
    fn invoke_chaincode(&self, contract: &str, args: &[Vec<u8>], channel: &str) -> Response {
        if contract != self.config.contract || channel != self.config.channel {
            return Response::error(
                Status::NotFound,
                format!("contract {} not found on channel {}", contract, channel),
            );
        }

        match args {
            [function, asset] if function.as_slice() == self.config.function.as_bytes() => {
                let asset = String::from_utf8_lossy(asset);
                match self.owners.get(asset.as_ref()) {
                    Some(owner) => Response::success(owner.as_str().as_bytes().to_vec()),
                    None => Response::error(Status::NotFound, format!("asset {} not found", asset)),
                }
            }
            [function, ..] if function.as_slice() != self.config.function.as_bytes() => {
                Response::error(Status::Forbidden, "unknown function name")
            }
            _ => Response::error(Status::Forbidden, "incorrect number of arguments"),
        }
    }
}
