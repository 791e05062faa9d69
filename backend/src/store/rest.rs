//! REST client for the contract record store
//!
//! Thin HTTP adapter over the store's routes:
//!
//! - `GET  {base}/api/contracts/{id}/settlement-data/`
//! - `POST {base}/api/contracts/{id}/settle/`
//! - `PATCH {base}/api/contracts/{id}/` (status update)
//!
//! The base URL is an explicit configuration value handed in at
//! construction; there is no process-global endpoint state. Monetary
//! fields cross the wire as decimal strings and are converted at this
//! boundary; HTTP 404 maps to [`StoreError::NotFound`], 409 to
//! [`StoreError::Conflict`], transport failures to
//! [`StoreError::Network`].

use super::{SettlementStore, StoreError};
use crate::core::money::{format_amount, parse_amount};
use crate::models::contract::ContractStatus;
use crate::models::snapshot::{RawSettlementData, SettlementPayload, SettlementRecord};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

/// Store-access configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Like `http://127.0.0.1:8000` (no trailing slash required).
    pub base_url: String,
}

/// HTTP-backed [`SettlementStore`].
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

/// Settlement record as the store serializes it (decimal-string amounts).
#[derive(Deserialize)]
struct WireSettlementRecord {
    id: String,
    contract_id: String,
    bonus_total_amount: String,
    bonus_split_a: String,
    bonus_split_b: String,
    #[serde(default)]
    settled_at: Option<String>,
}

/// Body shape of a 409 response; the store reports the current status.
#[derive(Deserialize)]
struct ConflictBody {
    status: Option<ContractStatus>,
}

impl RestStore {
    /// Create a client for the given store endpoint.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn network(err: reqwest::Error) -> StoreError {
        StoreError::Network {
            message: err.to_string(),
        }
    }

    fn wire_amount(field: &str, raw: &str) -> Result<i64, StoreError> {
        parse_amount(raw).map_err(|_| StoreError::InvalidResponse {
            message: format!("unparseable {field}: {raw:?}"),
        })
    }

    /// Map a non-success response to the store error taxonomy.
    async fn error_for(contract_id: &str, resp: reqwest::Response) -> StoreError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        match status.as_u16() {
            404 => StoreError::NotFound {
                contract_id: contract_id.to_string(),
            },
            409 => {
                let current = serde_json::from_str::<ConflictBody>(&body)
                    .ok()
                    .and_then(|b| b.status)
                    // Only the terminal state triggers the guard; assume it
                    // when the store omits the detail.
                    .unwrap_or(ContractStatus::Settled);
                warn!(contract_id, status = %current, "store rejected transition");
                StoreError::Conflict {
                    contract_id: contract_id.to_string(),
                    status: current,
                }
            }
            code => StoreError::Server { status: code, body },
        }
    }
}

#[async_trait]
impl SettlementStore for RestStore {
    async fn fetch_settlement_snapshot(
        &self,
        contract_id: &str,
    ) -> Result<RawSettlementData, StoreError> {
        let url = format!(
            "{}/api/contracts/{}/settlement-data/",
            self.base_url, contract_id
        );
        info!(url = %url, "fetching settlement snapshot");
        let resp = self.client.get(&url).send().await.map_err(Self::network)?;
        if !resp.status().is_success() {
            return Err(Self::error_for(contract_id, resp).await);
        }
        resp.json::<RawSettlementData>()
            .await
            .map_err(|e| StoreError::InvalidResponse {
                message: e.to_string(),
            })
    }

    async fn submit_settlement(
        &self,
        contract_id: &str,
        payload: &SettlementPayload,
    ) -> Result<SettlementRecord, StoreError> {
        let url = format!("{}/api/contracts/{}/settle/", self.base_url, contract_id);
        let body = serde_json::json!({
            "bonus_total_amount": format_amount(payload.bonus_total_amount),
            "bonus_split_a": format_amount(payload.bonus_split_a),
            "bonus_split_b": format_amount(payload.bonus_split_b),
        });

        info!(url = %url, total = payload.bonus_total_amount, "submitting settlement");
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Self::network)?;
        if !resp.status().is_success() {
            return Err(Self::error_for(contract_id, resp).await);
        }

        let wire: WireSettlementRecord =
            resp.json().await.map_err(|e| StoreError::InvalidResponse {
                message: e.to_string(),
            })?;
        Ok(SettlementRecord {
            bonus_total_amount: Self::wire_amount("bonus_total_amount", &wire.bonus_total_amount)?,
            bonus_split_a: Self::wire_amount("bonus_split_a", &wire.bonus_split_a)?,
            bonus_split_b: Self::wire_amount("bonus_split_b", &wire.bonus_split_b)?,
            id: wire.id,
            contract_id: wire.contract_id,
            settled_at: wire.settled_at,
        })
    }

    async fn set_contract_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
    ) -> Result<(), StoreError> {
        let url = format!("{}/api/contracts/{}/", self.base_url, contract_id);
        info!(url = %url, status = %status, "updating contract status");
        let resp = self
            .client
            .patch(&url)
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await
            .map_err(Self::network)?;
        if !resp.status().is_success() {
            return Err(Self::error_for(contract_id, resp).await);
        }
        Ok(())
    }
}
