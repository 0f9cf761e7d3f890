//! Core types for the payment ledger.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Account balance, a whole non-negative amount.
pub type Balance = u64;

/// Name of the event emitted by a successful debit.
pub const DEBIT_EVENT: &str = "debit";

/// The caller of an invocation, as resolved from its credential.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// The certificate subject common name
    pub holder: String,
    /// The issuer organization, cut at the first `.`
    pub organization: String,
}

impl Identity {
    /// Creates an identity from its two parts.
    pub fn new(holder: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            holder: holder.into(),
            organization: organization.into(),
        }
    }

    /// Builds the ledger key addressing this identity's balance.
    pub fn key(&self) -> LedgerKey {
        LedgerKey(format!("{}@{}", self.holder, self.organization))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.holder, self.organization)
    }
}

/// A key in the balance namespace, always `holder@organization`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerKey(String);

impl LedgerKey {
    /// Parses a key returned by another contract.
    ///
    /// The bytes must be UTF-8 with a non-empty part on each side of the last `@`.
    pub fn parse(bytes: &[u8]) -> Result<Self, String> {
        let text = std::str::from_utf8(bytes).map_err(|e| format!("owner is not UTF-8: {}", e))?;
        match text.rsplit_once('@') {
            Some((holder, org)) if !holder.is_empty() && !org.is_empty() => {
                Ok(LedgerKey(text.to_string()))
            }
            _ => Err(format!("{:?} is not of the form holder@organization", text)),
        }
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Identity> for LedgerKey {
    fn from(identity: &Identity) -> Self {
        identity.key()
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a decimal ASCII amount. Only digits are accepted.
pub fn parse_decimal(bytes: &[u8]) -> Option<Balance> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    // All digits, so this only fails on overflow.
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

/// Formats a balance the way it is stored.
pub fn format_decimal(balance: Balance) -> Vec<u8> {
    balance.to_string().into_bytes()
}

/// An event set by a contract during an invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// The event name
    pub name: String,
    /// The opaque event payload
    pub payload: Vec<u8>,
}

impl ContractEvent {
    /// The notification emitted after a debit, carrying the asset reference.
    pub fn debit(asset_ref: &str) -> Self {
        Self {
            name: DEBIT_EVENT.to_string(),
            payload: asset_ref.as_bytes().to_vec(),
        }
    }
}

/// An event that has been committed to a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedEvent {
    /// Position in the store's event log
    pub seq: u64,
    /// The transaction that set the event
    pub tx_id: TxId,
    /// The event name
    pub name: String,
    /// The opaque event payload
    pub payload: Vec<u8>,
}

/// A transaction identifier, the hex SHA-256 of a random nonce and the creator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(String);

impl TxId {
    /// Generates a fresh transaction id for the given creator bytes.
    pub fn generate(creator: &[u8]) -> Self {
        let mut nonce = [0u8; 24];
        rand::thread_rng().fill_bytes(&mut nonce);

        let mut hasher = Sha256::new();
        hasher.update(nonce);
        hasher.update(creator);
        TxId(hex::encode(hasher.finalize()))
    }

    /// The id as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response status classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The invocation succeeded
    Ok,
    /// The request itself was bad
    Forbidden,
    /// The addressed contract or record does not exist
    NotFound,
    /// The request conflicts with the recorded balance
    Conflict,
    /// The contract or one of its collaborators failed
    Internal,
}

impl Status {
    /// The numeric status code.
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::Conflict => 409,
            Status::Internal => 500,
        }
    }
}

/// The outcome of one contract invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// The numeric status
    pub status: u16,
    /// An error message, or a note on an otherwise empty success
    pub message: String,
    /// The success payload
    pub payload: Vec<u8>,
}

impl Response {
    /// A successful response with the given payload.
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Ok.code(),
            message: String::new(),
            payload,
        }
    }

    /// A failed response.
    pub fn error(status: Status, message: impl Into<String>) -> Self {
        Self {
            status: status.code(),
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Whether the response is a success.
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok.code()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response {{ status: {}, message: {}, payload: {} }}",
            self.status,
            self.message,
            String::from_utf8_lossy(&self.payload)
        )
    }
}
