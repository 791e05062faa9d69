//! Error taxonomy for the settlement engine
//!
//! Three families, mirroring how failures are scoped:
//!
//! - [`ValidationError`]: an invariant of this core was violated
//!   (malformed record amount, broken group shape, split/pool mismatch).
//!   Recovered locally; the caller is told which field or record failed
//!   and nothing is submitted.
//! - `Network`: the fetch or submit call failed at the transport layer.
//!   Retryable; no state changed.
//! - `Conflict`: the store rejected a transition because the group is no
//!   longer IN_PROGRESS (settled by a concurrent session). Fatal for the
//!   current session; the caller must re-fetch.
//!
//! Nothing in this crate is fatal to the process; every failure is scoped
//! to one settlement session.

use crate::models::contract::ContractStatus;
use thiserror::Error;

/// A broken invariant in settlement input or state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("malformed amount: {value:?}")]
    MalformedAmount { value: String },

    #[error("negative amount {amount} on record {record_id}")]
    NegativeAmount { record_id: String, amount: i64 },

    #[error("contract {contract_id} is not a primary (A) contract")]
    NotPrimaryContract { contract_id: String },

    #[error("group of {group_id}: expected a subordinate (B) contract, found role {role} on {contract_id}")]
    WrongRoleInGroup {
        group_id: String,
        contract_id: String,
        role: String,
    },

    #[error("subordinate contract {contract_id} does not reference primary {expected_parent}")]
    OrphanSubordinate {
        contract_id: String,
        expected_parent: String,
    },

    #[error(
        "bonus split does not add up for contract {contract_id}: {split_a} + {split_b} != {total_bonus}"
    )]
    SplitMismatch {
        contract_id: String,
        total_bonus: i64,
        split_a: i64,
        split_b: i64,
    },

    #[error("contract {contract_id} is {status} and cannot be marked completed")]
    NotInProgress {
        contract_id: String,
        status: ContractStatus,
    },
}

/// Top-level error surfaced to the caller of the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport-layer failure on fetch or submit. Retryable.
    #[error("network error for contract {contract_id}: {message}")]
    Network {
        contract_id: String,
        message: String,
    },

    /// The group's status is no longer IN_PROGRESS. The session is stale;
    /// re-fetch before doing anything else.
    #[error("contract {contract_id} already left settlement: status is {status}")]
    Conflict {
        contract_id: String,
        status: ContractStatus,
    },
}

impl EngineError {
    /// Whether the caller may retry the failed operation as-is.
    ///
    /// Only network failures are retryable; validation failures need a
    /// corrected input and conflicts need a fresh snapshot.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::Network { .. })
    }
}
