//! Error types for the storage crate.

use payment_core::LedgerError;
use thiserror::Error;

/// Errors that can occur in the storage crate.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error when the database cannot be opened.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// Error when a RocksDB operation fails.
    #[error("RocksDB error: {0}")]
    Rocks(#[from] rocksdb::Error),

    /// Error when serialization or deserialization fails.
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Error when a column family is missing.
    #[error("Missing column family: {0}")]
    MissingColumnFamily(&'static str),

    /// Error when a stored event key is not a sequence number.
    #[error("Corrupt event key: {0:?}")]
    CorruptEventKey(Vec<u8>),

    /// Error when the store lock is poisoned.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<StorageError> for LedgerError {
    fn from(error: StorageError) -> Self {
        LedgerError::Unavailable(error.to_string())
    }
}
