//! Interactive settlement session
//!
//! Drives one group through the pipeline: fetch → aggregate → profit →
//! bonus allocation → finalize. The session owns only transient state
//! (the derived snapshot and the current allocation); abandoning it
//! before finalize persists nothing and needs no cleanup.
//!
//! All computation is synchronous; the only async points are the initial
//! fetch and the final submit.
//!
//! # Example
//!
//! ```no_run
//! use contract_settlement_core_rs::bonus::Side;
//! use contract_settlement_core_rs::session::SettlementSession;
//! use contract_settlement_core_rs::settlement::Confirmation;
//! use contract_settlement_core_rs::store::memory::MemoryStore;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let mut session = SettlementSession::load(&store, "A1").await?;
//! session.set_rate(12.5);
//! session.edit_split(Side::A, 2_000_000);
//! session.finalize(&store, Confirmation::Confirmed).await?;
//! # Ok(())
//! # }
//! ```

use crate::bonus::{
    apply_split_edit, compute_bonus_pool, BonusAllocation, Side, DEFAULT_BONUS_RATE_PERCENT,
};
use crate::core::money::{coerce_amount_input, coerce_rate_input};
use crate::errors::EngineError;
use crate::models::contract::ContractStatus;
use crate::models::snapshot::SettlementSnapshot;
use crate::settlement::{finalize, Confirmation, FinalizeOutcome};
use crate::store::SettlementStore;

/// One in-progress settlement for one contract group.
#[derive(Debug, Clone)]
pub struct SettlementSession {
    contract_id: String,
    snapshot: SettlementSnapshot,
    allocation: BonusAllocation,
    /// Group was already SETTLED when fetched; the session is view-only.
    locked: bool,
}

impl SettlementSession {
    /// Fetch the group and derive the opening state: a fresh snapshot and
    /// a pool at the default 10% rate, split evenly.
    pub async fn load(
        store: &dyn SettlementStore,
        contract_id: &str,
    ) -> Result<Self, EngineError> {
        let raw = store
            .fetch_settlement_snapshot(contract_id)
            .await
            .map_err(|e| e.into_engine(contract_id))?;
        let snapshot = crate::profit::compute_snapshot(&raw)?;
        let allocation = compute_bonus_pool(snapshot.overall_profit, DEFAULT_BONUS_RATE_PERCENT);
        Ok(Self {
            contract_id: contract_id.to_string(),
            snapshot,
            allocation,
            locked: raw.contract_a.status == Some(ContractStatus::Settled),
        })
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    pub fn snapshot(&self) -> &SettlementSnapshot {
        &self.snapshot
    }

    pub fn allocation(&self) -> &BonusAllocation {
        &self.allocation
    }

    /// Whether the group was already settled when loaded. A locked
    /// session still shows figures but refuses to finalize.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Change the bonus rate. Recomputes the pool from the snapshot's
    /// overall profit and resets the split to even, discarding any manual
    /// split.
    pub fn set_rate(&mut self, rate_percent: f64) {
        self.allocation = compute_bonus_pool(self.snapshot.overall_profit, rate_percent);
    }

    /// Rate change from a raw input field; garbage coerces to 0%.
    pub fn set_rate_input(&mut self, raw: &str) {
        self.set_rate(coerce_rate_input(raw));
    }

    /// Assign one side of the split; the other side absorbs the
    /// remainder of the pool.
    pub fn edit_split(&mut self, side: Side, value: i64) {
        self.allocation = apply_split_edit(&self.allocation, side, value);
    }

    /// Split edit from a raw input field; garbage coerces to 0.
    pub fn edit_split_input(&mut self, side: Side, raw: &str) {
        self.edit_split(side, coerce_amount_input(raw));
    }

    /// Validate and submit this session's allocation.
    ///
    /// A session loaded against an already-settled group fails with a
    /// conflict before any store call.
    pub async fn finalize(
        &self,
        store: &dyn SettlementStore,
        confirmation: Confirmation,
    ) -> Result<FinalizeOutcome, EngineError> {
        if self.locked {
            return Err(EngineError::Conflict {
                contract_id: self.contract_id.clone(),
                status: ContractStatus::Settled,
            });
        }
        finalize(store, &self.contract_id, &self.allocation, confirmation).await
    }
}
