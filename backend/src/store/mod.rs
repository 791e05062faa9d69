//! External record store boundary
//!
//! The engine never mutates source records; it reads one aggregated
//! snapshot per settlement session and writes exactly one settlement
//! payload (plus the independent status update for "mark complete").
//! Everything else about the store (transport, persistence, the record
//! CRUD the surrounding application does) is the collaborator's concern.
//!
//! Two implementations:
//!
//! - [`rest::RestStore`]: reqwest client over the store's HTTP API,
//!   configured with an explicit base URL at construction.
//! - [`memory::MemoryStore`]: in-process store used by tests. It models
//!   the guarantee the engine requires from any real store: a
//!   status-guarded, single-writer transition into SETTLED, and refusal
//!   of record writes once a group is settled.

pub mod memory;
pub mod rest;

use crate::errors::EngineError;
use crate::models::contract::ContractStatus;
use crate::models::snapshot::{RawSettlementData, SettlementPayload, SettlementRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Failures at the store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-layer failure; nothing reached the store.
    #[error("transport error: {message}")]
    Network { message: String },

    /// The store answered with a non-success status outside the mapped
    /// ones (404/409).
    #[error("store returned {status}: {body}")]
    Server { status: u16, body: String },

    /// The store's response could not be interpreted.
    #[error("invalid store response: {message}")]
    InvalidResponse { message: String },

    /// No such contract.
    #[error("contract {contract_id} not found")]
    NotFound { contract_id: String },

    /// Status-guarded transition rejected: the group already left
    /// IN_PROGRESS (typically settled by a concurrent session).
    #[error("contract {contract_id} is {status}; transition rejected")]
    Conflict {
        contract_id: String,
        status: ContractStatus,
    },
}

impl StoreError {
    /// Fold a store failure into the engine taxonomy, attaching the
    /// contract the operation was about.
    pub fn into_engine(self, contract_id: &str) -> EngineError {
        match self {
            StoreError::Conflict {
                contract_id,
                status,
            } => EngineError::Conflict {
                contract_id,
                status,
            },
            other => EngineError::Network {
                contract_id: contract_id.to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// The logical operations the engine consumes from the record store.
///
/// All three are one-shot request/response calls with no intermediate
/// suspension visible to the settlement logic.
#[async_trait]
pub trait SettlementStore: Send + Sync {
    /// Fetch the full raw input for one group's settlement: the primary
    /// contract, its costs, the subordinate contracts, and their costs.
    async fn fetch_settlement_snapshot(
        &self,
        contract_id: &str,
    ) -> Result<RawSettlementData, StoreError>;

    /// Submit the finalized settlement. On success the store has
    /// transitioned the group to SETTLED and locked its records; the
    /// transition must be single-writer (a second submit returns
    /// [`StoreError::Conflict`]).
    async fn submit_settlement(
        &self,
        contract_id: &str,
        payload: &SettlementPayload,
    ) -> Result<SettlementRecord, StoreError>;

    /// Update a contract's lifecycle status (the "mark complete" action).
    async fn set_contract_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
    ) -> Result<(), StoreError>;
}
