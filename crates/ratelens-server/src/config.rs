//! Service configuration.

use ratelens_fetch::ClientConfig;
use ratelens_store::DEFAULT_POOL_SIZE;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default cap on request bodies, uploads included.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Runtime configuration of the HTTP service.
///
/// Built once at process start and handed to [`build_state`](crate::build_state)
/// and [`app_router`](crate::app_router).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub listen_addr: SocketAddr,
    /// PostgreSQL URL; persistence is disabled when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: usize,
    /// Allowed CORS origins; `*` allows any.
    pub cors_allow: Vec<String>,
    /// Timeout applied to every request.
    pub request_timeout: Duration,
    /// Largest accepted request body in bytes.
    pub body_limit: usize,
    /// Upstream rate source settings.
    pub upstream: ClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_secs(60),
            body_limit: DEFAULT_BODY_LIMIT,
            upstream: ClientConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Returns true if CORS allows any origin.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allow.is_empty() || self.cors_allow.iter().any(|o| o == "*")
    }
}

/// Splits a comma-separated origin list, dropping blanks.
#[must_use]
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
