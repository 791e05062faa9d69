//! Profit derivation
//!
//! Second stage of the settlement pipeline: turn aggregated totals into
//! the three profit figures. Pure integer arithmetic on cents.
//!
//! # The accounting model
//!
//! ```text
//! profit_a       = amount_a - total_cost_a - total_amount_b
//! profit_b       = total_amount_b - total_cost_b
//! overall_profit = amount_a - total_cost_a - total_cost_b
//! ```
//!
//! Side A pays for side B's work as a pass-through cost, so B's contract
//! amounts appear as a cost in A's view and as revenue in B's view. That
//! internal transfer nets out at the project level, which is why
//! `overall_profit` is defined directly from the two cost lines and not
//! as a sum of the per-side figures. The three formulas are the intended
//! accounting model; do not refactor one in terms of the others.
//!
//! Negative results are valid business outcomes (a loss), not errors.

use crate::aggregation::{aggregate, CostTotals};
use crate::core::money::Money;
use crate::errors::ValidationError;
use crate::models::snapshot::{RawSettlementData, SettlementSnapshot};

/// The three profit figures for one group (i64 cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitBreakdown {
    /// Side A's margin after paying its own costs and side B's work.
    pub profit_a: Money,
    /// Side B's internal margin.
    pub profit_b: Money,
    /// Project-level margin; the A↔B transfer nets out here.
    pub overall_profit: Money,
}

/// Derive the profit figures from aggregated totals. Pure.
pub fn compute_profit(totals: &CostTotals) -> ProfitBreakdown {
    ProfitBreakdown {
        profit_a: totals.amount_a - totals.total_cost_a - totals.total_amount_b,
        profit_b: totals.total_amount_b - totals.total_cost_b,
        overall_profit: totals.amount_a - totals.total_cost_a - totals.total_cost_b,
    }
}

/// Aggregate a raw fetch and derive the full settlement snapshot.
///
/// Pure function of the input: identical raw data yields identical
/// snapshots, with no hidden state carried between calls. Recomputed on
/// every read, never cached.
pub fn compute_snapshot(raw: &RawSettlementData) -> Result<SettlementSnapshot, ValidationError> {
    let totals = aggregate(raw)?;
    let profit = compute_profit(&totals);
    Ok(SettlementSnapshot {
        amount_a: totals.amount_a,
        total_cost_a: totals.total_cost_a,
        total_amount_b: totals.total_amount_b,
        total_cost_b: totals.total_cost_b,
        profit_a: profit.profit_a,
        profit_b: profit.profit_b,
        overall_profit: profit.overall_profit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        // amount_a=500000, cost_a=100000, amount_b=150000, cost_b=50000
        let totals = CostTotals {
            amount_a: 50_000_000,
            total_cost_a: 10_000_000,
            total_amount_b: 15_000_000,
            total_cost_b: 5_000_000,
        };
        let p = compute_profit(&totals);
        assert_eq!(p.profit_a, 25_000_000); // 250000.00
        assert_eq!(p.profit_b, 10_000_000); // 100000.00
        assert_eq!(p.overall_profit, 35_000_000); // 350000.00
    }

    #[test]
    fn test_overall_ignores_b_margin_line() {
        // overall_profit must be derived from cost_b directly, never from
        // profit_a + amount_b or similar refactorings. Changing amount_b
        // moves profit_a and profit_b but leaves overall untouched.
        let base = CostTotals {
            amount_a: 50_000_000,
            total_cost_a: 10_000_000,
            total_amount_b: 15_000_000,
            total_cost_b: 5_000_000,
        };
        let skewed = CostTotals {
            total_amount_b: 20_000_000,
            ..base
        };
        let p1 = compute_profit(&base);
        let p2 = compute_profit(&skewed);
        assert_eq!(p1.overall_profit, p2.overall_profit);
        assert_ne!(p1.profit_a, p2.profit_a);
        assert_ne!(p1.profit_b, p2.profit_b);
    }

    #[test]
    fn test_loss_is_valid() {
        let totals = CostTotals {
            amount_a: 1_000_00,
            total_cost_a: 2_000_00,
            total_amount_b: 0,
            total_cost_b: 0,
        };
        let p = compute_profit(&totals);
        assert_eq!(p.overall_profit, -1_000_00);
    }
}
