//! Contract model
//!
//! A contract group is one primary contract (role A, the client-facing
//! one) plus zero or more subordinate contracts (role B) that reference
//! it as parent. Settlement always operates on the whole group: B
//! contracts are not independently settleable.
//!
//! Lifecycle: IN_PROGRESS → COMPLETED (optional marker, A contracts only)
//! and IN_PROGRESS/COMPLETED → SETTLED (terminal, via settlement submit).
//! Once SETTLED, the group and all its cost/payment/invoice records are
//! read-only.
//!
//! CRITICAL: All money values are i64 (cents)

use crate::core::money::Money;
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// Role of a contract within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractRole {
    /// Primary, client-facing contract. Exactly one per group.
    A,
    /// Subordinate contract billed internally against the primary.
    B,
}

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Work ongoing; records may still be appended.
    #[serde(rename = "IN_PROGRESS")]
    InProgress,

    /// Marked complete by the user. A bookkeeping marker only; it does
    /// not lock anything and is reachable only from InProgress, only for
    /// A contracts.
    #[serde(rename = "COMPLETED")]
    Completed,

    /// Settlement submitted and accepted. Terminal; every record of the
    /// group is immutable from here on.
    #[serde(rename = "SETTLED")]
    Settled,
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContractStatus::InProgress => "IN_PROGRESS",
            ContractStatus::Completed => "COMPLETED",
            ContractStatus::Settled => "SETTLED",
        };
        f.write_str(s)
    }
}

/// A single contract as the engine sees it (amounts already in cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub name: String,
    /// Contract amount (i64 cents).
    pub amount: Money,
    pub role: ContractRole,
    pub status: ContractStatus,
    /// Id of the primary contract this one is subordinate to.
    /// `None` for A contracts, `Some` for B contracts.
    pub parent_id: Option<String>,
    /// ISO-8601 date strings, owned by the store.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Contract {
    pub fn is_primary(&self) -> bool {
        self.role == ContractRole::A
    }

    /// A settled contract is read-only on re-entry; the engine refuses to
    /// start any mutating flow against it.
    pub fn is_locked(&self) -> bool {
        self.status == ContractStatus::Settled
    }
}

/// One primary contract plus its subordinates.
///
/// Construction validates the group shape; a group that exists is a group
/// that satisfies the invariant (exactly one A, every B referencing it).
#[derive(Debug, Clone, PartialEq)]
pub struct ContractGroup {
    primary: Contract,
    subordinates: Vec<Contract>,
}

impl ContractGroup {
    /// Build a validated group.
    ///
    /// # Errors
    ///
    /// - `NotPrimaryContract` if `primary` does not have role A
    /// - `WrongRoleInGroup` if any subordinate has role A
    /// - `OrphanSubordinate` if a subordinate's parent_id is not the
    ///   primary's id
    pub fn new(primary: Contract, subordinates: Vec<Contract>) -> Result<Self, ValidationError> {
        if !primary.is_primary() {
            return Err(ValidationError::NotPrimaryContract {
                contract_id: primary.id.clone(),
            });
        }
        for sub in &subordinates {
            if sub.role != ContractRole::B {
                return Err(ValidationError::WrongRoleInGroup {
                    group_id: primary.id.clone(),
                    contract_id: sub.id.clone(),
                    role: format!("{:?}", sub.role),
                });
            }
            if sub.parent_id.as_deref() != Some(primary.id.as_str()) {
                return Err(ValidationError::OrphanSubordinate {
                    contract_id: sub.id.clone(),
                    expected_parent: primary.id.clone(),
                });
            }
        }
        Ok(Self {
            primary,
            subordinates,
        })
    }

    pub fn primary(&self) -> &Contract {
        &self.primary
    }

    pub fn subordinates(&self) -> &[Contract] {
        &self.subordinates
    }

    /// Group status is the primary's status; subordinates follow it for
    /// settlement purposes.
    pub fn status(&self) -> ContractStatus {
        self.primary.status
    }

    /// Decompose into the primary and its subordinates.
    pub fn into_parts(self) -> (Contract, Vec<Contract>) {
        (self.primary, self.subordinates)
    }
}
