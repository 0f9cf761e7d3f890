//! Tests for the debit relay over the RocksDB store.

use crate::{args, credential};
use payment_core::{
    AssetRegistry, ContractConfig, ContractOwnership, DebitRelay, Executor, Identity,
    OwnershipConfig, PaymentContract, RelayConfig, RelayReport, StateStore,
};
use payment_storage::RocksStore;
use tempfile::tempdir;

/// Tests that a relay pass credits producers and resumes from its cursor.
#[test]
fn test_relay_resumes_from_cursor() {
    let dir = tempdir().unwrap();
    let mut registry = AssetRegistry::new(OwnershipConfig::default());
    registry.register("track", Identity::new("producer", "Label").key());
    let executor = Executor::new(
        RocksStore::open(dir.path()).unwrap(),
        PaymentContract::new(
            ContractOwnership::new(registry, OwnershipConfig::default()),
            ContractConfig::default(),
        ),
    );

    let listener = credential("listener", "Gateway");
    let producer = credential("producer", "Label");
    executor.submit(&listener, "add", args(&["20"])).unwrap();
    executor.submit(&producer, "add", args(&["0"])).unwrap();
    executor.submit(&listener, "debit", args(&["4", "track"])).unwrap();

    let config = RelayConfig {
        default_price: Some(4),
        ..RelayConfig::default()
    };
    let relay = DebitRelay::new(&executor, credential("orchestrator", "Gateway"), config);

    let first = relay.run_once(0).unwrap();
    assert_eq!(first, RelayReport { credited: 1, skipped: 0, failed: 0, cursor: 1 });

    executor.submit(&listener, "debit", args(&["4", "track"])).unwrap();
    let second = relay.run_once(first.cursor).unwrap();
    assert_eq!(second, RelayReport { credited: 1, skipped: 0, failed: 0, cursor: 2 });

    assert_eq!(
        executor.store().get_state("producer@Label").unwrap(),
        Some(b"8".to_vec())
    );
    assert_eq!(
        executor.store().get_state("listener@Gateway").unwrap(),
        Some(b"12".to_vec())
    );

    // Credits emit no events of their own
    assert_eq!(executor.store().events_since(0).unwrap().len(), 2);
}
