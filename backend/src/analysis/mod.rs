//! Read-only profit views
//!
//! Everything here derives figures for display and changes nothing:
//! the per-group profit analysis and the dashboard's cross-contract
//! summaries.
//!
//! Sibling groups are independent: the summary fetches them
//! concurrently and awaits them jointly, with no cross-contract locking.

use crate::errors::EngineError;
use crate::models::contract::{Contract, ContractStatus};
use crate::profit::{compute_snapshot, ProfitBreakdown};
use crate::store::SettlementStore;
use futures::future::try_join_all;
use std::collections::HashMap;

/// One row of the dashboard's profit chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractProfit {
    pub contract_id: String,
    pub name: String,
    /// Project-level margin (i64 cents).
    pub overall_profit: i64,
}

/// Fetch one group and derive its profit figures.
pub async fn profit_analysis(
    store: &dyn SettlementStore,
    contract_id: &str,
) -> Result<ProfitBreakdown, EngineError> {
    let raw = store
        .fetch_settlement_snapshot(contract_id)
        .await
        .map_err(|e| e.into_engine(contract_id))?;
    let snapshot = compute_snapshot(&raw)?;
    Ok(ProfitBreakdown {
        profit_a: snapshot.profit_a,
        profit_b: snapshot.profit_b,
        overall_profit: snapshot.overall_profit,
    })
}

/// Overall profit per primary contract, fetched concurrently.
///
/// Order of the result follows the order of `contract_ids`. One failing
/// fetch fails the whole summary; each group's aggregation is otherwise
/// independent.
pub async fn overall_profit_summary(
    store: &dyn SettlementStore,
    contract_ids: &[String],
) -> Result<Vec<ContractProfit>, EngineError> {
    let fetches = contract_ids.iter().map(|id| async move {
        let raw = store
            .fetch_settlement_snapshot(id)
            .await
            .map_err(|e| e.into_engine(id))?;
        let snapshot = compute_snapshot(&raw)?;
        Ok::<_, EngineError>(ContractProfit {
            contract_id: raw.contract_a.id,
            name: raw.contract_a.name,
            overall_profit: snapshot.overall_profit,
        })
    });
    try_join_all(fetches).await
}

/// Count contracts per lifecycle status (dashboard progress chart). Pure.
pub fn status_breakdown(contracts: &[Contract]) -> HashMap<ContractStatus, usize> {
    let mut counts = HashMap::new();
    for contract in contracts {
        *counts.entry(contract.status).or_insert(0) += 1;
    }
    counts
}
