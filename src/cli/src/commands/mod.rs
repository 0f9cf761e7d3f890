//! Commands for the payment ledger harness.

pub mod balances;
pub mod events;
pub mod init_config;
pub mod invoke;
pub mod relay;
