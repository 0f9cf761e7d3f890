//! End-to-end contract scenarios over the RocksDB store.

use crate::{args, credential};
use payment_core::{
    AssetRegistry, ContractConfig, ContractOwnership, Executor, Identity, LedgerKey,
    OverflowPolicy, OwnershipConfig, OwnershipError, OwnershipResolver, PaymentContract,
    StateStore, NO_BALANCE,
};
use payment_storage::RocksStore;
use tempfile::tempdir;

fn registry() -> AssetRegistry {
    let mut registry = AssetRegistry::new(OwnershipConfig::default());
    registry.register("asset1", Identity::new("alice", "OrgA").key());
    registry.register("song-9", Identity::new("bob", "OrgB").key());
    registry
}

fn executor(
    store: RocksStore,
    config: ContractConfig,
) -> Executor<RocksStore, ContractOwnership<AssetRegistry>> {
    let ownership = ContractOwnership::new(registry(), config.ownership.clone());
    Executor::new(store, PaymentContract::new(ownership, config))
}

/// Tests the add, query and debit flow for a single holder.
#[test]
fn test_add_query_debit() {
    let dir = tempdir().unwrap();
    let executor = executor(RocksStore::open(dir.path()).unwrap(), ContractConfig::default());
    let alice = credential("alice", "OrgA.example.com");

    // Nothing recorded yet
    let receipt = executor.submit(&alice, "query", Vec::new()).unwrap();
    assert_eq!(receipt.response.status, 200);
    assert!(receipt.response.payload.is_empty());
    assert_eq!(receipt.response.message, NO_BALANCE);

    let receipt = executor.submit(&alice, "add", args(&["100"])).unwrap();
    assert!(receipt.committed);
    assert!(receipt.event.is_none());

    let receipt = executor.submit(&alice, "query", Vec::new()).unwrap();
    assert_eq!(receipt.response.payload, b"100".to_vec());

    let receipt = executor.submit(&alice, "debit", args(&["30", "asset1"])).unwrap();
    assert!(receipt.committed);
    let event = receipt.event.unwrap();
    assert_eq!(event.name, "debit");
    assert_eq!(event.payload, b"asset1".to_vec());
    assert_eq!(event.tx_id, receipt.tx_id);

    let receipt = executor.submit(&alice, "query", Vec::new()).unwrap();
    assert_eq!(receipt.response.payload, b"70".to_vec());

    // Overdraft is a conflict and changes nothing
    let receipt = executor.submit(&alice, "debit", args(&["1000", "asset1"])).unwrap();
    assert_eq!(receipt.response.status, 409);
    assert!(!receipt.committed);
    assert_eq!(
        executor.store().get_state("alice@OrgA").unwrap(),
        Some(b"70".to_vec())
    );
    assert_eq!(executor.store().events_since(0).unwrap().len(), 1);
}

/// Tests that request errors map to 403 and leave the ledger untouched.
#[test]
fn test_request_errors() {
    let dir = tempdir().unwrap();
    let executor = executor(RocksStore::open(dir.path()).unwrap(), ContractConfig::default());
    let alice = credential("alice", "OrgA");

    let receipt = executor.submit(&alice, "transfer", args(&["1"])).unwrap();
    assert_eq!(receipt.response.status, 403);
    assert_eq!(receipt.response.message, "unknown function name: transfer");

    let receipt = executor.submit(&alice, "add", Vec::new()).unwrap();
    assert_eq!(receipt.response.status, 403);

    let receipt = executor.submit(&alice, "debit", args(&["30"])).unwrap();
    assert_eq!(receipt.response.status, 403);

    executor.submit(&alice, "add", args(&["50"])).unwrap();
    let receipt = executor.submit(&alice, "debit", args(&["-5", "asset1"])).unwrap();
    assert_eq!(receipt.response.status, 403);

    let receipt = executor.submit(&alice, "query", Vec::new()).unwrap();
    assert_eq!(receipt.response.payload, b"50".to_vec());
    assert!(executor.store().events_since(0).unwrap().is_empty());
}

/// Tests that debiting a holder with no balance is a conflict.
#[test]
fn test_debit_without_balance() {
    let dir = tempdir().unwrap();
    let executor = executor(RocksStore::open(dir.path()).unwrap(), ContractConfig::default());

    let receipt = executor
        .submit(&credential("carol", "OrgC"), "debit", args(&["1", "asset1"]))
        .unwrap();
    assert_eq!(receipt.response.status, 409);
    assert_eq!(executor.store().get_state("carol@OrgC").unwrap(), None);
}

/// Tests crediting the owner of an asset.
#[test]
fn test_credit_asset_owner() {
    let dir = tempdir().unwrap();
    let executor = executor(RocksStore::open(dir.path()).unwrap(), ContractConfig::default());
    let alice = credential("alice", "OrgA");
    let caller = credential("anyone", "OrgZ");

    // The owner has no balance yet
    let receipt = executor.submit(&caller, "credit", args(&["asset1", "5"])).unwrap();
    assert_eq!(receipt.response.status, 409);

    executor.submit(&alice, "add", args(&["70"])).unwrap();
    let receipt = executor.submit(&caller, "credit", args(&["asset1", "5"])).unwrap();
    assert!(receipt.committed);
    assert!(receipt.event.is_none());
    assert_eq!(
        executor.store().get_state("alice@OrgA").unwrap(),
        Some(b"75".to_vec())
    );

    // Unknown assets fail the ownership lookup
    let receipt = executor.submit(&caller, "credit", args(&["asset404", "5"])).unwrap();
    assert_eq!(receipt.response.status, 500);
}

/// Tests both overflow policies at the top of the balance range.
#[test]
fn test_credit_overflow_policies() {
    let max = u64::MAX.to_string();

    let dir = tempdir().unwrap();
    let rejecting = executor(RocksStore::open(dir.path()).unwrap(), ContractConfig::default());
    let alice = credential("alice", "OrgA");
    rejecting.submit(&alice, "add", args(&[max.as_str()])).unwrap();
    let receipt = rejecting.submit(&alice, "credit", args(&["asset1", "1"])).unwrap();
    assert_eq!(receipt.response.status, 409);
    assert!(!receipt.committed);

    let dir = tempdir().unwrap();
    let config = ContractConfig {
        overflow: OverflowPolicy::Saturate,
        ..ContractConfig::default()
    };
    let saturating = executor(RocksStore::open(dir.path()).unwrap(), config);
    saturating.submit(&alice, "add", args(&[max.as_str()])).unwrap();
    let receipt = saturating.submit(&alice, "credit", args(&["asset1", "1"])).unwrap();
    assert!(receipt.committed);
    assert_eq!(
        saturating.store().get_state("alice@OrgA").unwrap(),
        Some(max.into_bytes())
    );
}

struct Unreachable;

impl OwnershipResolver for Unreachable {
    fn resolve_owner(&self, asset_key: &str) -> Result<LedgerKey, OwnershipError> {
        Err(OwnershipError::Rejected {
            asset: asset_key.to_string(),
            status: 500,
            message: "ownership contract unavailable".to_string(),
        })
    }
}

/// Tests that a failed ownership lookup mutates nothing.
#[test]
fn test_ownership_failure_is_internal() {
    let dir = tempdir().unwrap();
    let store = RocksStore::open(dir.path()).unwrap();
    let executor = Executor::new(
        store,
        PaymentContract::new(Unreachable, ContractConfig::default()),
    );
    let alice = credential("alice", "OrgA");

    executor.submit(&alice, "add", args(&["10"])).unwrap();
    let receipt = executor.submit(&alice, "credit", args(&["asset1", "5"])).unwrap();
    assert_eq!(receipt.response.status, 500);
    assert!(!receipt.committed);
    assert_eq!(
        executor.store().get_state("alice@OrgA").unwrap(),
        Some(b"10".to_vec())
    );
}

/// Tests that balances and events survive reopening the store.
#[test]
fn test_state_survives_reopen() {
    let dir = tempdir().unwrap();
    let alice = credential("alice", "OrgA");

    {
        let executor = executor(RocksStore::open(dir.path()).unwrap(), ContractConfig::default());
        executor.submit(&alice, "add", args(&["100"])).unwrap();
        executor.submit(&alice, "debit", args(&["40", "asset1"])).unwrap();
    }

    let executor = executor(RocksStore::open(dir.path()).unwrap(), ContractConfig::default());
    let receipt = executor.submit(&alice, "query", Vec::new()).unwrap();
    assert_eq!(receipt.response.payload, b"60".to_vec());

    let receipt = executor.submit(&alice, "debit", args(&["10", "song-9"])).unwrap();
    assert_eq!(receipt.event.unwrap().seq, 1);
}
