//! HTTP client for the upstream rate source.

use ratelens_types::{BASE_CURRENCY, DateRange, RateRecord, RatelensError};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

use crate::parse::{ParseError, parse_currencies, parse_rates};
use crate::url::{DEFAULT_BASE_URL, currencies_url, symbols_param, timeseries_url};

/// Configuration for the rates client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the upstream source.
    pub base_url: String,
    /// Timeout for time-series requests.
    pub timeout: Duration,
    /// Timeout for the currency listing.
    pub currencies_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            currencies_timeout: Duration::from_secs(10),
            user_agent: format!("ratelens/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Returns the configuration pointed at another base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Errors that can occur when talking to the upstream source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Upstream answered with an unusable payload.
    #[error("Invalid upstream payload: {0}")]
    Payload(#[from] ParseError),
}

impl From<FetchError> for RatelensError {
    fn from(err: FetchError) -> Self {
        Self::Upstream(err.to_string())
    }
}

/// Client for the upstream exchange-rate source.
///
/// Rates are always requested against the USD pivot base. Requests are made
/// once; there are no retries.
#[derive(Debug, Clone)]
pub struct RatesClient {
    client: Client,
    config: ClientConfig,
}

impl RatesClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches daily rates of `currencies` against USD over `range`.
    ///
    /// Returns `Ok` with an empty vector when the source has no data for the
    /// request.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// payload without a `rates` field.
    pub async fn fetch_rates<S: AsRef<str>>(
        &self,
        currencies: &[S],
        range: &DateRange,
    ) -> Result<Vec<RateRecord>, FetchError> {
        if currencies.is_empty() {
            return Ok(Vec::new());
        }

        let url = timeseries_url(&self.config.base_url, range);
        let symbols = symbols_param(currencies);
        tracing::debug!(%url, to = %symbols, "Fetching rates");

        let response = self
            .client
            .get(&url)
            .query(&[("from", BASE_CURRENCY), ("to", symbols.as_str())])
            .send()
            .await
            .inspect_err(|e| tracing::warn!(%url, error = %e, "Rate request failed"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Upstream rejected rate request");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let records = parse_rates(&body)?;
        tracing::info!(records = records.len(), %range, "Fetched rates");
        Ok(records)
    }

    /// Fetches the upstream currency listing as `code -> name`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// payload that is not a JSON object of strings.
    pub async fn fetch_currencies(&self) -> Result<BTreeMap<String, String>, FetchError> {
        let url = currencies_url(&self.config.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.config.currencies_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(parse_currencies(&body)?)
    }
}
