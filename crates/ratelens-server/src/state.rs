//! Shared handler state.

use chrono::{NaiveDate, Utc};
use ratelens_fetch::RatesClient;
use ratelens_store::{PgRateStore, RateRepository};
use std::sync::Arc;

use crate::ServerConfig;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Upstream rate source.
    pub client: RatesClient,
    /// Durable store; `None` when persistence is disabled.
    pub store: Option<Arc<dyn RateRepository>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("client", &self.client)
            .field("persistence", &self.store.is_some())
            .finish()
    }
}

impl AppState {
    /// Creates state from already built parts.
    #[must_use]
    pub fn new(client: RatesClient, store: Option<Arc<dyn RateRepository>>) -> Self {
        Self { client, store }
    }

    /// Returns today's date in UTC, the upper bound of request windows.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Builds the handler state from configuration.
///
/// Migrations run here. A failed migration is logged and the store is kept:
/// later writes will fail and be logged per request.
///
/// # Errors
///
/// Returns an error if the HTTP client or the connection pool cannot be
/// built.
pub async fn build_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let client = RatesClient::new(config.upstream.clone())?;
    tracing::info!(upstream = %config.upstream.base_url, "Rate source configured");

    let store: Option<Arc<dyn RateRepository>> = match &config.database_url {
        Some(url) => {
            let store = PgRateStore::connect(url, config.pool_size)?;
            if let Err(e) = store.migrate().await {
                tracing::error!(error = %e, "Database initialization failed");
            }
            Some(Arc::new(store))
        }
        None => {
            tracing::warn!("No database URL configured, persistence disabled");
            None
        }
    };

    Ok(Arc::new(AppState::new(client, store)))
}
