//! Settlement finalization
//!
//! The single terminal action of a settlement session, plus the
//! independent "mark complete" status flip.
//!
//! # State machine
//!
//! ```text
//! IN_PROGRESS ──(mark complete, A only)──► COMPLETED
//!      │                                       │
//!      └───────────(finalize)──────────────────┴──► SETTLED  (terminal)
//! ```
//!
//! COMPLETED is a bookkeeping marker with no settlement-math meaning.
//! SETTLED has no outgoing transition; the store guards the settle
//! transition so only one session ever wins it.
//!
//! # Finalize contract
//!
//! 1. Precondition: the split conserves the pool within one cent, else
//!    [`ValidationError::SplitMismatch`] and **no store call is made**.
//! 2. The user's yes/no gate is modeled as [`Confirmation`]; a cancel
//!    returns [`FinalizeOutcome::Cancelled`] with state untouched.
//! 3. On store success the group is SETTLED. On network failure state is
//!    pre-submission and finalize is retryable; on conflict the session
//!    is stale and the caller must re-fetch.

use crate::bonus::BonusAllocation;
use crate::errors::{EngineError, ValidationError};
use crate::models::contract::{Contract, ContractStatus};
use crate::models::snapshot::{SettlementPayload, SettlementRecord};
use crate::store::SettlementStore;
use tracing::info;

/// Outcome of the user's yes/no gate, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// Result of a finalize attempt that did not error.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeOutcome {
    /// Settlement accepted; the group is locked.
    Settled(SettlementRecord),
    /// User cancelled at the gate; nothing was submitted.
    Cancelled,
}

/// Validate the split and submit the settlement.
///
/// One external call plus the precondition check. See the module docs for
/// the full contract.
pub async fn finalize(
    store: &dyn SettlementStore,
    contract_id: &str,
    allocation: &BonusAllocation,
    confirmation: Confirmation,
) -> Result<FinalizeOutcome, EngineError> {
    if !allocation.is_balanced() {
        return Err(ValidationError::SplitMismatch {
            contract_id: contract_id.to_string(),
            total_bonus: allocation.total_bonus,
            split_a: allocation.split_a,
            split_b: allocation.split_b,
        }
        .into());
    }

    if confirmation == Confirmation::Cancelled {
        return Ok(FinalizeOutcome::Cancelled);
    }

    let payload = SettlementPayload {
        bonus_total_amount: allocation.total_bonus,
        bonus_split_a: allocation.split_a,
        bonus_split_b: allocation.split_b,
    };
    let record = store
        .submit_settlement(contract_id, &payload)
        .await
        .map_err(|e| e.into_engine(contract_id))?;

    info!(
        contract_id,
        total = record.bonus_total_amount,
        split_a = record.bonus_split_a,
        split_b = record.bonus_split_b,
        "settlement finalized"
    );
    Ok(FinalizeOutcome::Settled(record))
}

/// Flip an in-progress primary contract to COMPLETED.
///
/// Independent of settlement math: only the status changes, nothing is
/// locked. Exists only for A contracts and only from IN_PROGRESS.
pub async fn mark_completed(
    store: &dyn SettlementStore,
    contract: &Contract,
) -> Result<(), EngineError> {
    if !contract.is_primary() {
        return Err(ValidationError::NotPrimaryContract {
            contract_id: contract.id.clone(),
        }
        .into());
    }
    if contract.status != ContractStatus::InProgress {
        return Err(ValidationError::NotInProgress {
            contract_id: contract.id.clone(),
            status: contract.status,
        }
        .into());
    }

    store
        .set_contract_status(&contract.id, ContractStatus::Completed)
        .await
        .map_err(|e| e.into_engine(&contract.id))?;
    info!(contract_id = %contract.id, "contract marked completed");
    Ok(())
}
