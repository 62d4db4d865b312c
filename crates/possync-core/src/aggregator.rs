// ── Sync aggregation ──
//
// One invocation: validate → derive credentials → fetch transactions
// (required) → fetch customers + products concurrently (best-effort) →
// assemble. Nothing survives between invocations.

use std::sync::Arc;

use possync_api::{Credentials, Record, StoreHubClient};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::clock::{Clock, SystemClock, format_day};
use crate::config::SyncConfig;
use crate::error::SyncFailure;
use crate::model::{SyncRequest, SyncResult};

/// Exactly one of a result or a failure per request.
pub type SyncOutcome = Result<SyncResult, SyncFailure>;

/// Pulls one day of StoreHub data into a single payload.
///
/// Transactions are the required resource: any failure there ends the
/// sync with a [`SyncFailure`]. Customers and products are optional
/// enrichment: a failure on either yields an empty list and the sync
/// still succeeds. Retries are left to the caller.
///
/// Cheap to share; holds only configuration and a clock.
#[derive(Clone)]
pub struct SyncAggregator {
    config: SyncConfig,
    clock: Arc<dyn Clock>,
}

impl SyncAggregator {
    pub fn new(config: SyncConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: SyncConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run one synchronization.
    pub async fn synchronize(&self, request: SyncRequest) -> SyncOutcome {
        let Some((username, password)) = request.credentials() else {
            debug!("rejecting sync request without credentials");
            return Err(SyncFailure::missing_credentials());
        };

        let date = request
            .requested_date()
            .map_or_else(|| format_day(self.clock.today()), str::to_owned);

        let credentials = Credentials::basic(username, password);
        let client = StoreHubClient::new(
            &self.config.base_url,
            &credentials,
            &self.config.transport(),
        )?;
        drop(credentials);

        let span = info_span!("sync", date = %date);
        Self::collect(&client, date).instrument(span).await
    }

    async fn collect(client: &StoreHubClient, date: String) -> SyncOutcome {
        let transactions = client
            .list_transactions(&date, &date)
            .await
            .map_err(|e| {
                warn!(error = %e, "transaction fetch failed");
                SyncFailure::from_api("transactions", e)
            })?;

        let (customers_res, products_res) =
            tokio::join!(client.list_customers(), client.list_products());

        let customers = unwrap_or_empty("customers", customers_res);
        let products = unwrap_or_empty("products", products_res);

        info!(
            transactions = transactions.len(),
            customers = customers.len(),
            products = products.len(),
            "sync assembled"
        );

        Ok(SyncResult::new(date, transactions, customers, products))
    }
}

/// Downgrade a failed optional fetch to an empty list.
///
/// The caller never sees why; the warning is the only trace of it.
fn unwrap_or_empty(resource: &str, result: Result<Vec<Record>, possync_api::Error>) -> Vec<Record> {
    match result {
        Ok(records) => records,
        Err(e) => {
            warn!(
                resource,
                status = e.status(),
                timeout = e.is_timeout(),
                error = %e,
                "optional fetch failed, treating as empty"
            );
            Vec::new()
        }
    }
}
