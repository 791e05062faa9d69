//! Bonus pool and two-sided split
//!
//! Third stage of the pipeline, and the interactive one: a bonus pool is
//! carved out of overall profit at a percentage rate and split between
//! the two sides of the group.
//!
//! # Critical Invariants
//!
//! 1. **Conservation**: after any accepted mutation,
//!    `split_a + split_b == total_bonus` within one cent. Editing one
//!    side always recomputes the other from the pool; there are no two
//!    independently mutable fields that could drift apart.
//! 2. **Pool stability**: a split edit never touches `total_bonus`. Only
//!    a profit or rate change recomputes the pool, and that reset
//!    redistributes the split evenly.
//!
//! Edits are last-write-wins; there is no history and no undo. Negative
//! allocations to one side are permitted (no floor/ceiling check).
//!
//! # Example
//!
//! ```rust
//! use contract_settlement_core_rs::bonus::{apply_split_edit, compute_bonus_pool, Side};
//!
//! // 10% of a 350000.00 profit
//! let alloc = compute_bonus_pool(35_000_000, 10.0);
//! assert_eq!(alloc.total_bonus, 3_500_000);
//! assert_eq!(alloc.split_a, 1_750_000);
//! assert_eq!(alloc.split_b, 1_750_000);
//!
//! // Hand side A a bigger share; side B absorbs the difference.
//! let alloc = apply_split_edit(&alloc, Side::A, 2_000_000);
//! assert_eq!(alloc.split_b, 1_500_000);
//! assert!(alloc.is_balanced());
//! ```

use crate::core::money::{Money, SPLIT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Default bonus rate presented to a fresh settlement session: 10%.
pub const DEFAULT_BONUS_RATE_PERCENT: f64 = 10.0;

/// The two parties a bonus pool is split between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// Current bonus pool and its split (cents).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusAllocation {
    /// Percentage of overall profit set aside as the pool.
    pub rate_percent: f64,
    /// `overall_profit * rate_percent / 100`, rounded to cents.
    pub total_bonus: Money,
    pub split_a: Money,
    pub split_b: Money,
}

impl BonusAllocation {
    /// Conservation check: `split_a + split_b == total_bonus` within one
    /// cent.
    pub fn is_balanced(&self) -> bool {
        (self.split_a + self.split_b - self.total_bonus).abs() <= SPLIT_TOLERANCE
    }
}

/// Compute the bonus pool and reset the split to even.
///
/// Called whenever overall profit or the rate changes. The even reset is
/// a deliberate re-partition policy, not a derived fact: any manual split
/// is discarded because it was negotiated against the old pool. When the
/// pool holds an odd number of cents the leftover cent goes to side B
/// (`split_a = total / 2` truncated toward zero), keeping conservation
/// exact in integer arithmetic.
///
/// The pool itself is rounded half away from zero to whole cents; a
/// negative overall profit yields a negative pool.
pub fn compute_bonus_pool(overall_profit: Money, rate_percent: f64) -> BonusAllocation {
    let total_bonus = (overall_profit as f64 * rate_percent / 100.0).round() as Money;
    let split_a = total_bonus / 2;
    BonusAllocation {
        rate_percent,
        total_bonus,
        split_a,
        split_b: total_bonus - split_a,
    }
}

/// Apply an explicit edit to one side of the split.
///
/// Pure: returns the new allocation, leaving the input untouched. The
/// edited side takes `value` verbatim (negative included); the other side
/// becomes `total_bonus - value`. The pool is never modified here.
pub fn apply_split_edit(allocation: &BonusAllocation, side: Side, value: Money) -> BonusAllocation {
    let (split_a, split_b) = match side {
        Side::A => (value, allocation.total_bonus - value),
        Side::B => (allocation.total_bonus - value, value),
    };
    BonusAllocation {
        split_a,
        split_b,
        ..*allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_recompute_resets_evenly() {
        let alloc = compute_bonus_pool(35_000_000, 10.0);
        assert_eq!(alloc.total_bonus, 3_500_000);
        assert_eq!(alloc.split_a, 1_750_000);
        assert_eq!(alloc.split_b, 1_750_000);
    }

    #[test]
    fn test_odd_cent_goes_to_side_b() {
        // 0.05% of 1.00 -> pool rounds to... use a direct odd pool: 3 cents.
        let alloc = compute_bonus_pool(30, 10.0); // pool = 3 cents
        assert_eq!(alloc.total_bonus, 3);
        assert_eq!(alloc.split_a, 1);
        assert_eq!(alloc.split_b, 2);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn test_negative_profit_gives_negative_pool() {
        let alloc = compute_bonus_pool(-10_000, 10.0);
        assert_eq!(alloc.total_bonus, -1_000);
        assert_eq!(alloc.split_a + alloc.split_b, -1_000);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn test_zero_rate_zero_pool() {
        let alloc = compute_bonus_pool(35_000_000, 0.0);
        assert_eq!(alloc.total_bonus, 0);
        assert_eq!(alloc.split_a, 0);
        assert_eq!(alloc.split_b, 0);
    }

    #[test]
    fn test_split_edit_conserves_pool() {
        let alloc = compute_bonus_pool(35_000_000, 10.0);
        let edited = apply_split_edit(&alloc, Side::A, 2_000_000);
        assert_eq!(edited.total_bonus, alloc.total_bonus);
        assert_eq!(edited.split_a, 2_000_000);
        assert_eq!(edited.split_b, 1_500_000);
        assert!(edited.is_balanced());
    }

    #[test]
    fn test_split_edit_side_b() {
        let alloc = compute_bonus_pool(35_000_000, 10.0);
        let edited = apply_split_edit(&alloc, Side::B, 500_000);
        assert_eq!(edited.split_b, 500_000);
        assert_eq!(edited.split_a, 3_000_000);
        assert!(edited.is_balanced());
    }

    #[test]
    fn test_negative_split_is_permitted() {
        let alloc = compute_bonus_pool(35_000_000, 10.0);
        let edited = apply_split_edit(&alloc, Side::A, -100_000);
        assert_eq!(edited.split_a, -100_000);
        assert_eq!(edited.split_b, 3_600_000);
        assert!(edited.is_balanced());
    }

    #[test]
    fn test_edits_are_last_write_wins() {
        let alloc = compute_bonus_pool(35_000_000, 10.0);
        let a = apply_split_edit(&alloc, Side::A, 2_000_000);
        let b = apply_split_edit(&a, Side::B, 3_000_000);
        // The later B edit overrides the earlier A edit entirely.
        assert_eq!(b.split_b, 3_000_000);
        assert_eq!(b.split_a, 500_000);
        assert!(b.is_balanced());
    }
}
