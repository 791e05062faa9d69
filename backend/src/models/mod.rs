//! Domain models for the settlement engine

pub mod contract;
pub mod records;
pub mod snapshot;

// Re-exports
pub use contract::{Contract, ContractGroup, ContractRole, ContractStatus};
pub use records::{CostRecord, InvoiceRecord, PaymentRecord};
pub use snapshot::{
    RawContract, RawCostRecord, RawSettlementData, SettlementPayload, SettlementRecord,
    SettlementSnapshot,
};
