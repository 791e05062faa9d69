//! In-memory reference store
//!
//! Backs the test suite and documents, in executable form, the contract
//! the engine expects from the real store:
//!
//! 1. **Single-writer settle**: the transition into SETTLED is guarded by
//!    the current status. A second submit, from this session or a
//!    concurrent one, gets [`StoreError::Conflict`], never a second
//!    settlement record.
//! 2. **Lock rule**: once a group is SETTLED, every cost/payment/invoice
//!    write against any contract of the group is refused.
//! 3. Settling the primary settles its subordinates; B contracts have no
//!    independent settlement lifecycle.

use super::{SettlementStore, StoreError};
use crate::core::money::format_amount;
use crate::models::contract::{Contract, ContractGroup, ContractStatus};
use crate::models::records::{CostRecord, InvoiceRecord, PaymentRecord};
use crate::models::snapshot::{
    RawContract, RawCostRecord, RawSettlementData, SettlementPayload, SettlementRecord,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

#[derive(Default)]
struct Inner {
    contracts: HashMap<String, Contract>,
    costs: Vec<CostRecord>,
    payments: Vec<PaymentRecord>,
    invoices: Vec<InvoiceRecord>,
    settlements: HashMap<String, SettlementRecord>,
}

/// In-process [`SettlementStore`] with the status-guarded settle
/// transition.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store mutex poisoned")
    }

    pub fn insert_contract(&self, contract: Contract) {
        self.lock().contracts.insert(contract.id.clone(), contract);
    }

    /// Insert a validated group: the primary and all its subordinates.
    pub fn insert_group(&self, group: ContractGroup) {
        let (primary, subordinates) = group.into_parts();
        self.insert_contract(primary);
        for sub in subordinates {
            self.insert_contract(sub);
        }
    }

    pub fn contract(&self, contract_id: &str) -> Option<Contract> {
        self.lock().contracts.get(contract_id).cloned()
    }

    /// Whether a settlement record exists for the contract.
    pub fn settlement(&self, contract_id: &str) -> Option<SettlementRecord> {
        self.lock().settlements.get(contract_id).cloned()
    }

    /// Refuse writes against contracts of a settled group.
    fn check_unlocked(inner: &Inner, contract_id: &str) -> Result<(), StoreError> {
        let contract = inner
            .contracts
            .get(contract_id)
            .ok_or_else(|| StoreError::NotFound {
                contract_id: contract_id.to_string(),
            })?;
        if contract.status == ContractStatus::Settled {
            return Err(StoreError::Conflict {
                contract_id: contract_id.to_string(),
                status: ContractStatus::Settled,
            });
        }
        Ok(())
    }

    /// Append a cost record. Costs are append-only until the owning group
    /// settles; afterwards this returns `Conflict`.
    pub fn add_cost(&self, record: CostRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::check_unlocked(&inner, &record.contract_id)?;
        inner.costs.push(record);
        Ok(())
    }

    pub fn add_payment(&self, record: PaymentRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::check_unlocked(&inner, &record.contract_id)?;
        inner.payments.push(record);
        Ok(())
    }

    pub fn add_invoice(&self, record: InvoiceRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::check_unlocked(&inner, &record.contract_id)?;
        inner.invoices.push(record);
        Ok(())
    }

    fn raw_contract(contract: &Contract) -> RawContract {
        RawContract {
            id: contract.id.clone(),
            name: contract.name.clone(),
            amount: format_amount(contract.amount),
            status: Some(contract.status),
        }
    }

    fn raw_costs(inner: &Inner, contract_id: &str) -> Vec<RawCostRecord> {
        inner
            .costs
            .iter()
            .filter(|c| c.contract_id == contract_id)
            .map(|c| RawCostRecord {
                id: c.id.clone(),
                amount: format_amount(c.amount),
            })
            .collect()
    }
}

#[async_trait]
impl SettlementStore for MemoryStore {
    async fn fetch_settlement_snapshot(
        &self,
        contract_id: &str,
    ) -> Result<RawSettlementData, StoreError> {
        let inner = self.lock();
        let primary = inner
            .contracts
            .get(contract_id)
            .ok_or_else(|| StoreError::NotFound {
                contract_id: contract_id.to_string(),
            })?;

        let subs: Vec<&Contract> = inner
            .contracts
            .values()
            .filter(|c| c.parent_id.as_deref() == Some(contract_id))
            .collect();

        let mut costs_b = Vec::new();
        for sub in &subs {
            costs_b.extend(Self::raw_costs(&inner, &sub.id));
        }

        Ok(RawSettlementData {
            contract_a: Self::raw_contract(primary),
            costs_a: Self::raw_costs(&inner, contract_id),
            contracts_b: subs.iter().map(|c| Self::raw_contract(c)).collect(),
            costs_b,
        })
    }

    async fn submit_settlement(
        &self,
        contract_id: &str,
        payload: &SettlementPayload,
    ) -> Result<SettlementRecord, StoreError> {
        let mut inner = self.lock();
        let status = inner
            .contracts
            .get(contract_id)
            .map(|c| c.status)
            .ok_or_else(|| StoreError::NotFound {
                contract_id: contract_id.to_string(),
            })?;

        // Status-guarded single-writer transition: anything already
        // settled is rejected, whoever asks.
        if status == ContractStatus::Settled {
            return Err(StoreError::Conflict {
                contract_id: contract_id.to_string(),
                status,
            });
        }

        let record = SettlementRecord {
            id: uuid::Uuid::new_v4().to_string(),
            contract_id: contract_id.to_string(),
            bonus_total_amount: payload.bonus_total_amount,
            bonus_split_a: payload.bonus_split_a,
            bonus_split_b: payload.bonus_split_b,
            settled_at: None,
        };
        inner
            .settlements
            .insert(contract_id.to_string(), record.clone());

        // The group settles as a whole; subordinates follow the primary.
        for contract in inner.contracts.values_mut() {
            if contract.id == contract_id || contract.parent_id.as_deref() == Some(contract_id) {
                contract.status = ContractStatus::Settled;
            }
        }

        info!(contract_id, total = payload.bonus_total_amount, "group settled");
        Ok(record)
    }

    async fn set_contract_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::check_unlocked(&inner, contract_id)?;
        if let Some(contract) = inner.contracts.get_mut(contract_id) {
            contract.status = status;
        }
        Ok(())
    }
}
