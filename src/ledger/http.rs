//! HTTP ledger client
//!
//! Talks to the HTTP bridge that fronts the budgeting ledger. Every request is
//! scoped to one budget file (the sync id) and authenticated with the server
//! password in the `x-api-key` header.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::json;
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::wire::parse_month_response;
use super::LedgerService;
use crate::config::LedgerSettings;
use crate::error::{FafoError, FafoResult};
use crate::models::{BudgetMonth, CategoryId, Money, MonthKey};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A connected session against the ledger's HTTP bridge
pub struct HttpLedger {
    client: Client,
    base_url: Url,
    sync_id: String,
    api_key: Zeroizing<String>,
    open: AtomicBool,
}

impl HttpLedger {
    /// Connect to the ledger and open the configured budget
    ///
    /// Fails when the server is unreachable, the password is rejected or the
    /// budget does not exist.
    pub async fn connect(settings: &LedgerSettings) -> FafoResult<Self> {
        info!(url = %settings.server_url, "Connecting to ledger server");

        let base_url = Url::parse(&settings.server_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                FafoError::Config(format!(
                    "ACTUAL_SERVER_URL is not a valid server URL: {}",
                    settings.server_url
                ))
            })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FafoError::Network(format!("Failed to build HTTP client: {}", e)))?;

        let ledger = Self {
            client,
            base_url,
            sync_id: settings.sync_id.clone(),
            api_key: settings.password.clone(),
            open: AtomicBool::new(true),
        };

        ledger.send(ledger.client.get(ledger.url(&["months"])?)).await?;
        info!("Connected and budget downloaded");

        Ok(ledger)
    }

    /// Budget-scoped endpoint; each segment is percent-encoded on its own
    fn url(&self, segments: &[&str]) -> FafoResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FafoError::Config(format!(
                    "ACTUAL_SERVER_URL is not a valid server URL: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["v1", "budgets", self.sync_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> FafoResult<Response> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(FafoError::Network("Ledger session is closed".into()));
        }

        let resp = request
            .header("x-api-key", self.api_key.as_str())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FafoError::Ledger {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        Ok(resp)
    }
}

#[async_trait]
impl LedgerService for HttpLedger {
    async fn sync(&self) -> FafoResult<()> {
        self.send(self.client.post(self.url(&["sync"])?)).await?;
        Ok(())
    }

    async fn budget_month(&self, month: MonthKey) -> FafoResult<BudgetMonth> {
        let month_key = month.to_string();
        let resp = self
            .send(self.client.get(self.url(&["months", &month_key])?))
            .await?;
        let body = resp.text().await?;
        parse_month_response(&body, month)
    }

    async fn set_budget_amount(
        &self,
        month: MonthKey,
        category_id: &CategoryId,
        amount: Money,
    ) -> FafoResult<()> {
        let month_key = month.to_string();
        let url = self.url(&["months", &month_key, "categories", category_id.as_str()])?;
        let body = json!({ "category": { "budgeted": amount.cents() } });
        self.send(self.client.patch(url).json(&body)).await?;
        Ok(())
    }

    async fn run_bank_sync(&self) -> FafoResult<()> {
        info!("Running bank sync");
        self.send(self.client.post(self.url(&["banksync"])?)).await?;
        Ok(())
    }

    async fn disconnect(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            debug!("Ledger session closed");
        } else {
            debug!("Ledger session already closed");
        }
    }
}
