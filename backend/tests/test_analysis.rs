//! Tests for the read-only profit views

use contract_settlement_core_rs::store::memory::MemoryStore;
use contract_settlement_core_rs::{
    overall_profit_summary, profit_analysis, status_breakdown, Contract, ContractRole,
    ContractStatus, CostRecord, EngineError,
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

fn cost(id: &str, contract_id: &str, amount: i64) -> CostRecord {
    CostRecord {
        id: id.to_string(),
        contract_id: contract_id.to_string(),
        amount,
    }
}

/// Two independent groups: A1/B1 and A2 (no subordinates).
fn seeded() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_contract(contract("A1", ContractRole::A, None, 50_000_000));
    store.insert_contract(contract("B1", ContractRole::B, Some("A1"), 15_000_000));
    store.insert_contract(contract("A2", ContractRole::A, None, 20_000_000));
    store.add_cost(cost("c1", "A1", 10_000_000)).unwrap();
    store.add_cost(cost("c2", "B1", 5_000_000)).unwrap();
    store.add_cost(cost("c3", "A2", 8_000_000)).unwrap();
    store
}

#[tokio::test]
async fn test_profit_analysis_for_one_group() {
    let store = seeded();
    let breakdown = profit_analysis(&store, "A1").await.unwrap();
    assert_eq!(breakdown.profit_a, 25_000_000);
    assert_eq!(breakdown.profit_b, 10_000_000);
    assert_eq!(breakdown.overall_profit, 35_000_000);
}

#[tokio::test]
async fn test_summary_covers_sibling_groups_in_order() {
    let store = seeded();
    let ids = vec!["A1".to_string(), "A2".to_string()];
    let rows = overall_profit_summary(&store, &ids).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].contract_id, "A1");
    assert_eq!(rows[0].overall_profit, 35_000_000);
    assert_eq!(rows[1].contract_id, "A2");
    assert_eq!(rows[1].overall_profit, 12_000_000);
}

#[tokio::test]
async fn test_summary_fails_on_unknown_contract() {
    let store = seeded();
    let ids = vec!["A1".to_string(), "missing".to_string()];
    let err = overall_profit_summary(&store, &ids).await.unwrap_err();
    assert!(matches!(err, EngineError::Network { .. }));
}

#[test]
fn test_status_breakdown_counts_every_status() {
    let contracts = vec![
        contract("A1", ContractRole::A, None, 0),
        Contract {
            status: ContractStatus::Completed,
            ..contract("A2", ContractRole::A, None, 0)
        },
        Contract {
            status: ContractStatus::Settled,
            ..contract("A3", ContractRole::A, None, 0)
        },
        Contract {
            status: ContractStatus::Settled,
            ..contract("A4", ContractRole::A, None, 0)
        },
    ];
    let counts = status_breakdown(&contracts);
    assert_eq!(counts[&ContractStatus::InProgress], 1);
    assert_eq!(counts[&ContractStatus::Completed], 1);
    assert_eq!(counts[&ContractStatus::Settled], 2);
}
