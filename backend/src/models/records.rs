//! Financial sub-records of a contract
//!
//! Costs feed profit computation; payments and invoices do not, but all
//! three share the settlement lock rule: append-only while the owning
//! group is IN_PROGRESS or COMPLETED, immutable once SETTLED. The lock
//! itself is enforced at the store boundary (see `store::memory` for the
//! reference behavior).
//!
//! CRITICAL: All money values are i64 (cents)

use crate::core::money::Money;
use serde::{Deserialize, Serialize};

/// A cost booked against a contract. Amounts are non-negative; the
/// aggregator rejects anything else before it reaches this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub id: String,
    pub contract_id: String,
    /// Cost amount (i64 cents, >= 0).
    pub amount: Money,
}

/// A payment received on a contract. Not a profit input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub contract_id: String,
    pub amount: Money,
    /// ISO-8601 payment date.
    pub date: String,
}

/// An invoice issued under a contract. Not a profit input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: String,
    pub contract_id: String,
    pub amount: Money,
    /// ISO-8601 issue date.
    pub date: String,
    pub invoice_number: String,
}
