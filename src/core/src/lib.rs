//! Balance transition engine for the payment ledger.
//!
//! This crate resolves callers from their certificate credentials, addresses
//! balances by `holder@organization` keys, and runs the add, debit, credit and
//! query transitions inside a transaction envelope that commits their writes
//! and events atomically.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod errors;
pub mod executor;
pub mod identity;
pub mod ledger;
pub mod ownership;
pub mod relay;
pub mod tx;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::{ContractConfig, OverflowPolicy, OwnershipConfig, RelayConfig};
pub use dispatch::{Operation, NO_BALANCE};
pub use engine::PaymentContract;
pub use errors::{ContractError, IdentityError, LedgerError, OwnershipError, TxError};
pub use executor::{Executor, Receipt};
pub use identity::Credential;
pub use ledger::{BalanceAccess, EventSink, Ledger};
pub use ownership::{AssetRegistry, ChaincodeInvoker, ContractOwnership, OwnershipResolver};
pub use relay::{DebitRelay, RelayReport};
pub use tx::{MemoryStore, ReadWriteSet, StateStore, Transaction};
pub use types::{
    Balance, CommittedEvent, ContractEvent, Identity, LedgerKey, Response, Status, TxId,
};
