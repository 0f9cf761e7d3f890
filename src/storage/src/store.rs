//! RocksDB implementation of the ledger state store.
//!
//! Balances live in the `state` column family under their `holder@organization`
//! key. Committed events live in the `events` column family keyed by their
//! big-endian sequence number, so iteration order is commit order.

use crate::errors::StorageError;
use payment_core::{
    CommittedEvent, ContractEvent, LedgerError, ReadWriteSet, StateStore, TxError, TxId,
};
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB,
};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

const CF_STATE: &str = "state";
const CF_EVENTS: &str = "events";

/// A RocksDB-backed [`StateStore`].
#[derive(Clone)]
pub struct RocksStore {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    /// The RocksDB instance
    db: DB,
    /// Sequence number of the next committed event
    next_seq: u64,
}

impl RocksStore {
    /// Opens the store at the given path, creating it if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(CF_STATE, Options::default()),
            ColumnFamilyDescriptor::new(CF_EVENTS, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StorageError::Open(e.to_string()))?;

        let next_seq = match last_event_seq(&db)? {
            Some(seq) => seq + 1,
            None => 0,
        };

        info!(path = %path.as_ref().display(), next_seq, "opened ledger store");

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner { db, next_seq })),
        })
    }

    /// All recorded balances, in key order, as stored.
    pub fn entries(&self) -> Result<Vec<(String, Vec<u8>)>, StorageError> {
        let inner = self.lock()?;
        let state = cf(&inner.db, CF_STATE)?;

        let mut entries = Vec::new();
        for item in inner.db.iterator_cf(state, IteratorMode::Start) {
            let (key, value) = item?;
            entries.push((String::from_utf8_lossy(&key).into_owned(), value.into_vec()));
        }
        Ok(entries)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StorageError> {
        self.inner.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl StateStore for RocksStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let inner = self.lock()?;
        let state = cf(&inner.db, CF_STATE)?;
        let value = inner
            .db
            .get_cf(state, key)
            .map_err(StorageError::from)?;
        Ok(value)
    }

    fn commit(
        &self,
        tx_id: &TxId,
        rwset: &ReadWriteSet,
        event: Option<&ContractEvent>,
    ) -> Result<Option<CommittedEvent>, TxError> {
        let mut inner = self.lock().map_err(LedgerError::from)?;
        let state = cf(&inner.db, CF_STATE).map_err(LedgerError::from)?;
        let events = cf(&inner.db, CF_EVENTS).map_err(LedgerError::from)?;

        for (key, seen) in &rwset.reads {
            let current = inner
                .db
                .get_cf(state, key)
                .map_err(|e| LedgerError::from(StorageError::from(e)))?;
            if current.as_ref() != seen.as_ref() {
                debug!(tx_id = %tx_id, key = %key, "read set no longer valid");
                return Err(TxError::MvccReadConflict(key.clone()));
            }
        }

        let mut batch = WriteBatch::default();
        for (key, value) in &rwset.writes {
            batch.put_cf(state, key, value);
        }

        let committed = event.map(|event| CommittedEvent {
            seq: inner.next_seq,
            tx_id: tx_id.clone(),
            name: event.name.clone(),
            payload: event.payload.clone(),
        });
        if let Some(committed) = &committed {
            let bytes = bincode::serialize(committed)
                .map_err(|e| LedgerError::from(StorageError::from(e)))?;
            batch.put_cf(events, committed.seq.to_be_bytes(), bytes);
        }

        inner
            .db
            .write(batch)
            .map_err(|e| LedgerError::from(StorageError::from(e)))?;

        if committed.is_some() {
            inner.next_seq += 1;
        }

        Ok(committed)
    }

    fn events_since(&self, seq: u64) -> Result<Vec<CommittedEvent>, LedgerError> {
        let inner = self.lock()?;
        let events = cf(&inner.db, CF_EVENTS)?;
        let start = seq.to_be_bytes();

        let mut committed = Vec::new();
        for item in inner
            .db
            .iterator_cf(events, IteratorMode::From(&start, Direction::Forward))
        {
            let (_, value) = item.map_err(StorageError::from)?;
            let event: CommittedEvent =
                bincode::deserialize(&value).map_err(StorageError::from)?;
            committed.push(event);
        }
        Ok(committed)
    }
}

fn cf<'a>(db: &'a DB, name: &'static str) -> Result<&'a ColumnFamily, StorageError> {
    db.cf_handle(name)
        .ok_or(StorageError::MissingColumnFamily(name))
}

fn last_event_seq(db: &DB) -> Result<Option<u64>, StorageError> {
    let events = cf(db, CF_EVENTS)?;
    match db.iterator_cf(events, IteratorMode::End).next() {
        Some(item) => {
            let (key, _) = item?;
            let bytes = <[u8; 8]>::try_from(&key[..])
                .map_err(|_| StorageError::CorruptEventKey(key.to_vec()))?;
            Ok(Some(u64::from_be_bytes(bytes)))
        }
        None => Ok(None),
    }
}
