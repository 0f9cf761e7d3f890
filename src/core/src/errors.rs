//! Error types for the core crate.

use crate::types::{Balance, LedgerKey, Status};
use thiserror::Error;

/// Errors that can occur while turning a caller credential into an identity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The credential does not contain a delimited PEM certificate.
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    /// The PEM block or the certificate inside it could not be decoded.
    #[error("Certificate decode error: {0}")]
    CertificateDecode(String),

    /// The certificate issuer carries no organization.
    #[error("Certificate issuer has no organization")]
    MissingOrganization,

    /// The certificate subject has no common name.
    #[error("Certificate subject has an empty common name")]
    EmptyCommonName,
}

/// Errors raised by the key-value ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The underlying store could not be reached.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while resolving the owner of an asset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnershipError {
    /// The ownership contract answered with a non-success status.
    #[error("Ownership query for {asset} failed with status {status}: {message}")]
    Rejected {
        /// The asset that was looked up
        asset: String,
        /// The status returned by the ownership contract
        status: u16,
        /// The message returned by the ownership contract
        message: String,
    },

    /// The ownership contract answered with something that is not a ledger key.
    #[error("Ownership query for {asset} returned a malformed owner: {reason}")]
    MalformedOwner {
        /// The asset that was looked up
        asset: String,
        /// Why the payload was rejected
        reason: String,
    },
}

/// Errors produced by a contract invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The requested function is not one the contract exposes.
    #[error("unknown function name: {0}")]
    UnknownFunction(String),

    /// The argument list has the wrong length.
    #[error("incorrect number of arguments for {function}: expected {expected}, got {actual}")]
    Argument {
        /// The function being invoked
        function: &'static str,
        /// The expected argument count
        expected: usize,
        /// The actual argument count
        actual: usize,
    },

    /// An amount argument is not a non-negative decimal integer.
    #[error("Invalid transaction amount {0:?}, expecting an integer value")]
    InvalidAmount(String),

    /// No balance has been recorded for the key.
    #[error("balance not found for {0}")]
    BalanceNotFound(LedgerKey),

    /// The debit exceeds the available balance.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// The requested amount
        required: Balance,
        /// The current balance
        available: Balance,
    },

    /// The credit would push the balance past the representable maximum.
    #[error("balance overflow for {key}: {balance} + {amount}")]
    BalanceOverflow {
        /// The credited key
        key: LedgerKey,
        /// The current balance
        balance: Balance,
        /// The amount being credited
        amount: Balance,
    },

    /// The stored value is not a decimal integer.
    #[error("corrupt balance stored under {key}: {value:?}")]
    CorruptBalance {
        /// The key holding the value
        key: LedgerKey,
        /// The stored value, lossily decoded
        value: String,
    },

    /// The caller's identity could not be resolved.
    #[error("identity resolution error: {0}")]
    Identity(#[from] IdentityError),

    /// The ledger could not be reached.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The owner of the credited asset could not be resolved.
    #[error("ownership resolution error: {0}")]
    OwnershipResolution(#[from] OwnershipError),
}

impl ContractError {
    /// The response status this error maps to.
    ///
    /// Request errors (the caller's fault) use 403, balance conflicts use 409
    /// and everything else is an internal failure with 500.
    pub fn status(&self) -> Status {
        match self {
            ContractError::UnknownFunction(_)
            | ContractError::Argument { .. }
            | ContractError::InvalidAmount(_) => Status::Forbidden,
            ContractError::BalanceNotFound(_)
            | ContractError::InsufficientBalance { .. }
            | ContractError::BalanceOverflow { .. } => Status::Conflict,
            ContractError::CorruptBalance { .. }
            | ContractError::Identity(_)
            | ContractError::Ledger(_)
            | ContractError::OwnershipResolution(_) => Status::Internal,
        }
    }

    /// A stable, machine-readable name for the error.
    pub fn kind(&self) -> &'static str {
        match self {
            ContractError::UnknownFunction(_) => "UnknownFunction",
            ContractError::Argument { .. } => "ArgumentError",
            ContractError::InvalidAmount(_) => "InvalidAmount",
            ContractError::BalanceNotFound(_) => "BalanceNotFound",
            ContractError::InsufficientBalance { .. } => "InsufficientBalance",
            ContractError::BalanceOverflow { .. } => "BalanceOverflow",
            ContractError::CorruptBalance { .. } => "CorruptBalance",
            ContractError::Identity(IdentityError::MalformedCredential(_)) => "MalformedCredential",
            ContractError::Identity(IdentityError::CertificateDecode(_)) => {
                "CertificateDecodeError"
            }
            ContractError::Identity(IdentityError::MissingOrganization) => "MissingOrganization",
            ContractError::Identity(IdentityError::EmptyCommonName) => "EmptyCommonName",
            ContractError::Ledger(_) => "LedgerUnavailable",
            ContractError::OwnershipResolution(_) => "OwnershipResolutionError",
        }
    }
}

/// Errors raised when committing a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    /// A key read by the transaction changed before commit.
    #[error("MVCC read conflict on key {0}")]
    MvccReadConflict(String),

    /// The store failed while applying the transaction.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
