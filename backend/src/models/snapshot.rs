//! Settlement wire shapes and derived figures
//!
//! `Raw*` types mirror the store's `settlement-data` response byte for
//! byte: amounts stay unparsed strings so that a malformed amount is
//! reported by the aggregator as a validation failure instead of being
//! silently coerced during deserialization.
//!
//! [`SettlementSnapshot`] is derived, never persisted: a pure function of
//! the group's current records, recomputed on every read.
//!
//! CRITICAL: All parsed money values are i64 (cents)

use crate::core::money::Money;
use crate::models::contract::ContractStatus;
use serde::{Deserialize, Serialize};

/// A contract entry exactly as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawContract {
    pub id: String,
    pub name: String,
    /// Decimal string, e.g. "500000.00". Parsed by the aggregator.
    pub amount: String,
    /// Lifecycle status, when the store includes it. A `Settled` primary
    /// makes the whole session read-only on re-entry.
    #[serde(default)]
    pub status: Option<ContractStatus>,
}

/// A cost record entry exactly as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCostRecord {
    pub id: String,
    /// Decimal string. Parsed by the aggregator.
    pub amount: String,
}

/// Everything `fetch_settlement_snapshot` returns for one group:
/// the primary contract, its costs, the subordinate contracts, and all
/// of their costs pooled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSettlementData {
    pub contract_a: RawContract,
    pub costs_a: Vec<RawCostRecord>,
    pub contracts_b: Vec<RawContract>,
    pub costs_b: Vec<RawCostRecord>,
}

/// Derived profit figures for one settlement read.
///
/// `overall_profit` is computed from the two cost lines directly, never
/// from the per-side figures: side A's cost-of-B and side B's revenue are
/// the same internal transfer, which nets out at the project level but is
/// visible in the per-side views. Do not "simplify" the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSnapshot {
    /// Primary contract amount.
    pub amount_a: Money,
    /// Σ amount over the primary's cost records.
    pub total_cost_a: Money,
    /// Σ amount over the subordinate contracts' own amounts.
    pub total_amount_b: Money,
    /// Σ amount over all subordinate contracts' cost records.
    pub total_cost_b: Money,
    /// `amount_a - total_cost_a - total_amount_b`
    pub profit_a: Money,
    /// `total_amount_b - total_cost_b`
    pub profit_b: Money,
    /// `amount_a - total_cost_a - total_cost_b`
    pub overall_profit: Money,
}

/// The settlement payload submitted once per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPayload {
    pub bonus_total_amount: Money,
    pub bonus_split_a: Money,
    pub bonus_split_b: Money,
}

/// The finalized artifact as acknowledged by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub id: String,
    pub contract_id: String,
    pub bonus_total_amount: Money,
    pub bonus_split_a: Money,
    pub bonus_split_b: Money,
    /// ISO-8601 timestamp assigned by the store.
    pub settled_at: Option<String>,
}
