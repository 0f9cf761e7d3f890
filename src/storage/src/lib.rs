//! Persistent storage for the payment ledger.
//!
//! This crate provides a RocksDB-backed state store holding committed balances
//! and the append-only log of committed contract events.

pub mod errors;
pub mod store;

// Re-export commonly used types
pub use errors::StorageError;
pub use store::RocksStore;
