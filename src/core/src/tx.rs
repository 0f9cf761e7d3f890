//! Transaction envelope around a contract invocation.
//!
//! A [`Transaction`] records what the invocation read, buffers what it writes
//! and holds at most one event. Nothing reaches the [`StateStore`] until
//! [`Transaction::commit`], which re-checks every read under the store's lock
//! and applies the writes and the event together, or not at all.

use crate::errors::{LedgerError, TxError};
use crate::identity::Credential;
use crate::ledger::{EventSink, Ledger};
use crate::types::{CommittedEvent, ContractEvent, TxId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// The keys a transaction read, with the values it saw, and the values it wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadWriteSet {
    /// Value observed by the first read of each key
    pub reads: BTreeMap<String, Option<Vec<u8>>>,
    /// Last value written to each key
    pub writes: BTreeMap<String, Vec<u8>>,
}

/// Committed ledger state.
pub trait StateStore: Send + Sync {
    /// Reads the committed value under `key`.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Validates the read set and applies the writes and event atomically.
    ///
    /// Returns the committed event, if there was one.
    fn commit(
        &self,
        tx_id: &TxId,
        rwset: &ReadWriteSet,
        event: Option<&ContractEvent>,
    ) -> Result<Option<CommittedEvent>, TxError>;

    /// Committed events with a sequence number of at least `seq`, in order.
    fn events_since(&self, seq: u64) -> Result<Vec<CommittedEvent>, LedgerError>;
}

impl<T: StateStore + ?Sized> StateStore for &T {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        (**self).get_state(key)
    }

    fn commit(
        &self,
        tx_id: &TxId,
        rwset: &ReadWriteSet,
        event: Option<&ContractEvent>,
    ) -> Result<Option<CommittedEvent>, TxError> {
        (**self).commit(tx_id, rwset, event)
    }

    fn events_since(&self, seq: u64) -> Result<Vec<CommittedEvent>, LedgerError> {
        (**self).events_since(seq)
    }
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        (**self).get_state(key)
    }

    fn commit(
        &self,
        tx_id: &TxId,
        rwset: &ReadWriteSet,
        event: Option<&ContractEvent>,
    ) -> Result<Option<CommittedEvent>, TxError> {
        (**self).commit(tx_id, rwset, event)
    }

    fn events_since(&self, seq: u64) -> Result<Vec<CommittedEvent>, LedgerError> {
        (**self).events_since(seq)
    }
}

/// One invocation's view of the ledger.
pub struct Transaction<'s, S: ?Sized> {
    store: &'s S,
    tx_id: TxId,
    rwset: ReadWriteSet,
    event: Option<ContractEvent>,
}

impl<'s, S: StateStore + ?Sized> Transaction<'s, S> {
    /// Starts a transaction for `creator` against `store`.
    pub fn new(store: &'s S, creator: &Credential) -> Self {
        Self {
            store,
            tx_id: TxId::generate(creator.as_bytes()),
            rwset: ReadWriteSet::default(),
            event: None,
        }
    }

    /// The transaction id.
    pub fn tx_id(&self) -> &TxId {
        &self.tx_id
    }

    /// The reads and buffered writes so far.
    pub fn rwset(&self) -> &ReadWriteSet {
        &self.rwset
    }

    /// The buffered event, if any.
    pub fn event(&self) -> Option<&ContractEvent> {
        self.event.as_ref()
    }

    /// Commits the buffered writes and event to the store.
    pub fn commit(self) -> Result<Option<CommittedEvent>, TxError> {
        self.store.commit(&self.tx_id, &self.rwset, self.event.as_ref())
    }
}

impl<'s, S: StateStore + ?Sized> Ledger for Transaction<'s, S> {
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let value = self.store.get_state(key)?;
        self.rwset
            .reads
            .entry(key.to_string())
            .or_insert_with(|| value.clone());
        Ok(value)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.rwset.writes.insert(key.to_string(), value);
        Ok(())
    }
}

impl<'s, S: StateStore + ?Sized> EventSink for Transaction<'s, S> {
    fn set_event(&mut self, event: ContractEvent) -> Result<(), LedgerError> {
        self.event = Some(event);
        Ok(())
    }
}

/// An in-memory [`StateStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    state: BTreeMap<String, Vec<u8>>,
    events: Vec<CommittedEvent>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>, LedgerError> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl StateStore for MemoryStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.lock()?.state.get(key).cloned())
    }

    fn commit(
        &self,
        tx_id: &TxId,
        rwset: &ReadWriteSet,
        event: Option<&ContractEvent>,
    ) -> Result<Option<CommittedEvent>, TxError> {
        let mut inner = self.lock()?;

        for (key, seen) in &rwset.reads {
            if inner.state.get(key) != seen.as_ref() {
                return Err(TxError::MvccReadConflict(key.clone()));
            }
        }

        for (key, value) in &rwset.writes {
            inner.state.insert(key.clone(), value.clone());
        }

        let committed = event.map(|event| CommittedEvent {
            seq: inner.events.len() as u64,
            tx_id: tx_id.clone(),
            name: event.name.clone(),
            payload: event.payload.clone(),
        });
        if let Some(committed) = &committed {
            inner.events.push(committed.clone());
        }

        Ok(committed)
    }

    fn events_since(&self, seq: u64) -> Result<Vec<CommittedEvent>, LedgerError> {
        Ok(self
            .lock()?
            .events
            .iter()
            .filter(|event| event.seq >= seq)
            .cloned()
            .collect())
    }
}
