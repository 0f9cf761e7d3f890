//! Balance transitions.
//!
//! Every transition reads the latest committed value, validates, and only then
//! writes. Errors are returned before anything is written or emitted, so a
//! failed transition leaves no trace. Atomicity between the read and the write
//! is the envelope's job, not the engine's.

use crate::config::{ContractConfig, OverflowPolicy};
use crate::errors::ContractError;
use crate::ledger::{BalanceAccess, EventSink, Ledger};
use crate::ownership::OwnershipResolver;
use crate::types::{parse_decimal, Balance, ContractEvent, Identity, LedgerKey};
use tracing::debug;

/// The payment contract.
#[derive(Debug, Clone)]
pub struct PaymentContract<O> {
    ownership: O,
    config: ContractConfig,
}

impl<O: OwnershipResolver> PaymentContract<O> {
    /// Creates a contract resolving asset owners through `ownership`.
    pub fn new(ownership: O, config: ContractConfig) -> Self {
        Self { ownership, config }
    }

    /// The contract configuration.
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Overwrites the caller's balance with `amount`, stored as given.
    pub fn add<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        caller: &Identity,
        amount: &str,
    ) -> Result<(), ContractError> {
        let key = caller.key();
        ledger.write_raw(&key, amount.as_bytes().to_vec())?;
        debug!(key = %key, amount, "balance set");
        Ok(())
    }

    /// Takes `amount` from the caller's balance and emits a debit event for `asset_ref`.
    ///
    /// Returns the remaining balance.
    pub fn debit<L: Ledger + EventSink + ?Sized>(
        &self,
        ledger: &mut L,
        caller: &Identity,
        amount: &str,
        asset_ref: &str,
    ) -> Result<Balance, ContractError> {
        let key = caller.key();
        let available = ledger
            .read_balance(&key)?
            .ok_or_else(|| ContractError::BalanceNotFound(key.clone()))?;
        let amount = parse_amount(amount)?;

        if amount > available {
            return Err(ContractError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let remaining = available - amount;
        ledger.write_balance(&key, remaining)?;
        ledger.set_event(ContractEvent::debit(asset_ref))?;

        debug!(key = %key, amount, remaining, asset = asset_ref, "balance debited");
        Ok(remaining)
    }

    /// Adds `amount` to the balance of whoever owns `asset_key`.
    ///
    /// Returns the credited key and its new balance.
    pub fn credit<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        asset_key: &str,
        amount: &str,
    ) -> Result<(LedgerKey, Balance), ContractError> {
        let owner = self.ownership.resolve_owner(asset_key)?;
        let amount = parse_amount(amount)?;
        let balance = ledger
            .read_balance(&owner)?
            .ok_or_else(|| ContractError::BalanceNotFound(owner.clone()))?;

        let total = match self.config.overflow {
            OverflowPolicy::Reject => {
                balance
                    .checked_add(amount)
                    .ok_or_else(|| ContractError::BalanceOverflow {
                        key: owner.clone(),
                        balance,
                        amount,
                    })?
            }
            OverflowPolicy::Saturate => balance.saturating_add(amount),
        };

        ledger.write_balance(&owner, total)?;

        debug!(owner = %owner, amount, total, asset = asset_key, "balance credited");
        Ok((owner, total))
    }

    /// Reads the caller's raw balance, `None` if nothing was ever recorded.
    pub fn query<L: Ledger + ?Sized>(
        &self,
        ledger: &mut L,
        caller: &Identity,
    ) -> Result<Option<Vec<u8>>, ContractError> {
        ledger.read_raw(&caller.key())
    }
}

fn parse_amount(amount: &str) -> Result<Balance, ContractError> {
    parse_decimal(amount.as_bytes()).ok_or_else(|| ContractError::InvalidAmount(amount.to_string()))
}
