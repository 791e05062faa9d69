//! Tests for the interactive settlement session
//!
//! Load → rate/split edits → finalize, driven exactly as a UI would.

use contract_settlement_core_rs::store::memory::MemoryStore;
use contract_settlement_core_rs::{
    Confirmation, Contract, ContractRole, ContractStatus, CostRecord, EngineError,
    FinalizeOutcome, SettlementSession, Side,
};

fn contract(id: &str, role: ContractRole, parent: Option<&str>, amount: i64) -> Contract {
    Contract {
        id: id.to_string(),
        name: format!("contract {id}"),
        amount,
        role,
        status: ContractStatus::InProgress,
        parent_id: parent.map(str::to_string),
        start_date: None,
        end_date: None,
    }
}

fn seeded() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_contract(contract("A1", ContractRole::A, None, 50_000_000));
    store.insert_contract(contract("B1", ContractRole::B, Some("A1"), 15_000_000));
    store
        .add_cost(CostRecord {
            id: "c1".to_string(),
            contract_id: "A1".to_string(),
            amount: 10_000_000,
        })
        .unwrap();
    store
        .add_cost(CostRecord {
            id: "c2".to_string(),
            contract_id: "B1".to_string(),
            amount: 5_000_000,
        })
        .unwrap();
    store
}

#[tokio::test]
async fn test_load_computes_snapshot_and_default_pool() {
    let store = seeded();
    let session = SettlementSession::load(&store, "A1").await.unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.overall_profit, 35_000_000);
    assert_eq!(snapshot.profit_a, 25_000_000);
    assert_eq!(snapshot.profit_b, 10_000_000);

    // Fresh session opens at the default 10% rate, split evenly.
    let alloc = session.allocation();
    assert_eq!(alloc.rate_percent, 10.0);
    assert_eq!(alloc.total_bonus, 3_500_000);
    assert_eq!(alloc.split_a, 1_750_000);
    assert_eq!(alloc.split_b, 1_750_000);
    assert!(!session.is_locked());
}

#[tokio::test]
async fn test_rate_change_resets_manual_split() {
    let store = seeded();
    let mut session = SettlementSession::load(&store, "A1").await.unwrap();

    session.edit_split(Side::A, 3_000_000);
    assert_eq!(session.allocation().split_b, 500_000);

    session.set_rate(20.0);
    let alloc = session.allocation();
    assert_eq!(alloc.total_bonus, 7_000_000);
    assert_eq!(alloc.split_a, 3_500_000);
    assert_eq!(alloc.split_b, 3_500_000);
}

#[tokio::test]
async fn test_raw_field_inputs_coerce_garbage_to_zero() {
    let store = seeded();
    let mut session = SettlementSession::load(&store, "A1").await.unwrap();

    session.set_rate_input("not a rate");
    assert_eq!(session.allocation().total_bonus, 0);

    session.set_rate_input("10");
    session.edit_split_input(Side::A, "oops");
    let alloc = session.allocation();
    assert_eq!(alloc.split_a, 0);
    assert_eq!(alloc.split_b, 3_500_000);
    assert!(alloc.is_balanced());
}

#[tokio::test]
async fn test_session_finalize_end_to_end() {
    let store = seeded();
    let mut session = SettlementSession::load(&store, "A1").await.unwrap();
    session.edit_split(Side::B, 1_000_000);

    let outcome = session
        .finalize(&store, Confirmation::Confirmed)
        .await
        .unwrap();
    let record = match outcome {
        FinalizeOutcome::Settled(record) => record,
        other => panic!("expected settled, got {other:?}"),
    };
    assert_eq!(record.bonus_split_a, 2_500_000);
    assert_eq!(record.bonus_split_b, 1_000_000);
    assert_eq!(store.contract("A1").unwrap().status, ContractStatus::Settled);
}

#[tokio::test]
async fn test_abandoned_session_persists_nothing() {
    let store = seeded();
    {
        let mut session = SettlementSession::load(&store, "A1").await.unwrap();
        session.set_rate(50.0);
        session.edit_split(Side::A, 1);
        // dropped without finalize
    }
    assert!(store.settlement("A1").is_none());
    assert_eq!(
        store.contract("A1").unwrap().status,
        ContractStatus::InProgress
    );
}

#[tokio::test]
async fn test_reloaded_settled_group_is_read_only() {
    let store = seeded();
    let session = SettlementSession::load(&store, "A1").await.unwrap();
    session
        .finalize(&store, Confirmation::Confirmed)
        .await
        .unwrap();

    // Re-entering the settled group: figures still visible, finalize
    // refused before any store call.
    let reloaded = SettlementSession::load(&store, "A1").await.unwrap();
    assert!(reloaded.is_locked());
    assert_eq!(reloaded.snapshot().overall_profit, 35_000_000);

    let err = reloaded
        .finalize(&store, Confirmation::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict { .. }));
}
