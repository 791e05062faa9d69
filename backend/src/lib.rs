//! Contract Settlement Core - Rust Engine
//!
//! Aggregates a contract group's financial records into profit figures,
//! derives a performance bonus pool, keeps a two-sided bonus split under
//! a conservation invariant through interactive edits, and finalizes the
//! settlement into a locked, terminal state.
//!
//! # Architecture
//!
//! - **core**: Money representation and input parsing
//! - **models**: Domain types (Contract, records, snapshot shapes)
//! - **aggregation**: Raw records → per-group cost totals
//! - **profit**: Cost totals → the three profit figures
//! - **bonus**: Bonus pool and the conserved two-sided split
//! - **settlement**: Finalize (terminal) and the mark-complete action
//! - **session**: Interactive driver for one settlement
//! - **analysis**: Read-only profit views across groups
//! - **store**: External record store boundary (REST and in-memory)
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents); sums never touch floating point
//! 2. `split_a + split_b == total_bonus` within one cent after every
//!    accepted mutation
//! 3. SETTLED is terminal: one settlement per group, records locked

// Module declarations
pub mod aggregation;
pub mod analysis;
pub mod bonus;
pub mod core;
pub mod errors;
pub mod models;
pub mod profit;
pub mod session;
pub mod settlement;
pub mod store;

// Re-exports for convenience
pub use aggregation::{aggregate, CostTotals};
pub use analysis::{overall_profit_summary, profit_analysis, status_breakdown, ContractProfit};
pub use bonus::{
    apply_split_edit, compute_bonus_pool, BonusAllocation, Side, DEFAULT_BONUS_RATE_PERCENT,
};
pub use crate::core::money::{Money, SPLIT_TOLERANCE};
pub use errors::{EngineError, ValidationError};
pub use models::{
    contract::{Contract, ContractGroup, ContractRole, ContractStatus},
    records::{CostRecord, InvoiceRecord, PaymentRecord},
    snapshot::{RawSettlementData, SettlementPayload, SettlementRecord, SettlementSnapshot},
};
pub use profit::{compute_profit, compute_snapshot, ProfitBreakdown};
pub use session::SettlementSession;
pub use settlement::{finalize, mark_completed, Confirmation, FinalizeOutcome};
pub use store::{
    memory::MemoryStore,
    rest::{RestStore, StoreConfig},
    SettlementStore, StoreError,
};
