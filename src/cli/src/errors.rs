//! Error types for the CLI harness.

use payment_core::{LedgerError, TxError};
use payment_storage::StorageError;
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur in the CLI harness.
#[derive(Debug)]
pub enum CliError {
    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when the store cannot be opened or read.
    StorageError(StorageError),

    /// Error when the ledger cannot be reached.
    LedgerError(LedgerError),

    /// Error when a transaction fails to commit.
    CommitError(TxError),

    /// Error when a configured asset owner is not a ledger key.
    InvalidAsset(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError(e) => write!(f, "File error: {}", e),
            CliError::JsonError(e) => write!(f, "JSON error: {}", e),
            CliError::StorageError(e) => write!(f, "Storage error: {}", e),
            CliError::LedgerError(e) => write!(f, "Ledger error: {}", e),
            CliError::CommitError(e) => write!(f, "Commit failed: {}", e),
            CliError::InvalidAsset(msg) => write!(f, "Invalid asset: {}", msg),
        }
    }
}

impl StdError for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::FileError(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::JsonError(error)
    }
}

impl From<StorageError> for CliError {
    fn from(error: StorageError) -> Self {
        CliError::StorageError(error)
    }
}

impl From<LedgerError> for CliError {
    fn from(error: LedgerError) -> Self {
        CliError::LedgerError(error)
    }
}

impl From<TxError> for CliError {
    fn from(error: TxError) -> Self {
        CliError::CommitError(error)
    }
}
