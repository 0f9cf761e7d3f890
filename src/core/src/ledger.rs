//! Access to the key-value ledger.

use crate::errors::{ContractError, LedgerError};
use crate::types::{format_decimal, parse_decimal, Balance, ContractEvent, LedgerKey};

/// Read and write access to ledger state within one invocation.
pub trait Ledger {
    /// Reads the value under `key`, `None` if it was never written.
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Writes `value` under `key`.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;
}

/// Receives the event set by an invocation.
pub trait EventSink {
    /// Sets the invocation's event, replacing any earlier one.
    fn set_event(&mut self, event: ContractEvent) -> Result<(), LedgerError>;
}

/// Balance-level accessors on top of a [`Ledger`].
pub trait BalanceAccess: Ledger {
    /// Reads the raw bytes stored for `key`.
    fn read_raw(&mut self, key: &LedgerKey) -> Result<Option<Vec<u8>>, ContractError> {
        Ok(self.get_state(key.as_str())?)
    }

    /// Writes raw bytes for `key`.
    fn write_raw(&mut self, key: &LedgerKey, value: Vec<u8>) -> Result<(), ContractError> {
        Ok(self.put_state(key.as_str(), value)?)
    }

    /// Reads and parses the balance for `key`.
    fn read_balance(&mut self, key: &LedgerKey) -> Result<Option<Balance>, ContractError> {
        match self.read_raw(key)? {
            Some(bytes) => match parse_decimal(&bytes) {
                Some(balance) => Ok(Some(balance)),
                None => Err(ContractError::CorruptBalance {
                    key: key.clone(),
                    value: String::from_utf8_lossy(&bytes).into_owned(),
                }),
            },
            None => Ok(None),
        }
    }

    /// Writes `balance` for `key` as a decimal string.
    fn write_balance(&mut self, key: &LedgerKey, balance: Balance) -> Result<(), ContractError> {
        self.write_raw(key, format_decimal(balance))
    }
}

impl<L: Ledger + ?Sized> BalanceAccess for L {}
