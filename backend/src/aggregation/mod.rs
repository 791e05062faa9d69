//! Cost aggregation
//!
//! First stage of the settlement pipeline: turn the raw fetched records
//! of a contract group into per-group totals. Pure, no side effects.
//!
//! # Critical Invariants
//!
//! 1. **Strictness**: a malformed or negative amount anywhere in the
//!    input fails the whole aggregation with the offending record id.
//!    Nothing is coerced or skipped.
//! 2. **Additivity**: the total over a record set equals the sum of the
//!    totals over any partition of it (integer cents, no rounding drift).
//!
//! # Example
//!
//! ```rust
//! use contract_settlement_core_rs::models::{RawContract, RawCostRecord, RawSettlementData};
//! use contract_settlement_core_rs::aggregation::aggregate;
//!
//! let raw = RawSettlementData {
//!     contract_a: RawContract {
//!         id: "A1".to_string(),
//!         name: "Main".to_string(),
//!         amount: "500000.00".to_string(),
//!         status: None,
//!     },
//!     costs_a: vec![RawCostRecord { id: "c1".to_string(), amount: "100000.00".to_string() }],
//!     contracts_b: vec![RawContract {
//!         id: "B1".to_string(),
//!         name: "Sub".to_string(),
//!         amount: "150000.00".to_string(),
//!         status: None,
//!     }],
//!     costs_b: vec![RawCostRecord { id: "c2".to_string(), amount: "50000.00".to_string() }],
//! };
//!
//! let totals = aggregate(&raw).unwrap();
//! assert_eq!(totals.total_cost_a, 10_000_000);
//! assert_eq!(totals.total_amount_b, 15_000_000);
//! assert_eq!(totals.total_cost_b, 5_000_000);
//! ```

use crate::core::money::{parse_amount, Money};
use crate::errors::ValidationError;
use crate::models::snapshot::{RawCostRecord, RawSettlementData};

/// Per-group totals produced by aggregation (i64 cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostTotals {
    /// Primary contract amount.
    pub amount_a: Money,
    /// Σ amount over the primary's cost records.
    pub total_cost_a: Money,
    /// Σ amount over the subordinate contracts' own amounts.
    pub total_amount_b: Money,
    /// Σ amount over all subordinate contracts' cost records.
    pub total_cost_b: Money,
}

/// Parse and validate one record amount: numeric and non-negative.
fn checked_record_amount(record_id: &str, raw: &str) -> Result<Money, ValidationError> {
    let amount = parse_amount(raw)?;
    if amount < 0 {
        return Err(ValidationError::NegativeAmount {
            record_id: record_id.to_string(),
            amount,
        });
    }
    Ok(amount)
}

/// Sum a set of cost records, rejecting malformed or negative amounts.
pub fn sum_costs(records: &[RawCostRecord]) -> Result<Money, ValidationError> {
    let mut total: Money = 0;
    for record in records {
        total += checked_record_amount(&record.id, &record.amount)?;
    }
    Ok(total)
}

/// Aggregate a raw settlement fetch into per-group totals.
///
/// Pure function of the input; inputs are assumed already fetched.
pub fn aggregate(raw: &RawSettlementData) -> Result<CostTotals, ValidationError> {
    let amount_a = checked_record_amount(&raw.contract_a.id, &raw.contract_a.amount)?;
    let total_cost_a = sum_costs(&raw.costs_a)?;

    let mut total_amount_b: Money = 0;
    for sub in &raw.contracts_b {
        total_amount_b += checked_record_amount(&sub.id, &sub.amount)?;
    }

    let total_cost_b = sum_costs(&raw.costs_b)?;

    Ok(CostTotals {
        amount_a,
        total_cost_a,
        total_amount_b,
        total_cost_b,
    })
}
