//! Serve command implementation.
//!
//! This module builds the server configuration from flags and `RATELENS_*`
//! environment variables and runs the HTTP API until shutdown.

use anyhow::{Context, Result};
use clap::Args;
use ratelens_lib::{
    ClientConfig, DEFAULT_BODY_LIMIT, DEFAULT_PORT, ServerConfig, app_router, build_state,
    parse_origins,
};
use std::net::SocketAddr;
use std::time::Duration;

/// Flags of the `serve` command.
#[derive(Args, Debug)]
pub(crate) struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "RATELENS_LISTEN", default_value_t = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))]
    listen: SocketAddr,

    /// PostgreSQL URL. Persistence is disabled when unset.
    #[arg(long, env = "RATELENS_DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "RATELENS_POOL_SIZE", default_value = "16")]
    pool_size: usize,

    /// Comma-separated allowed CORS origins, `*` for any
    #[arg(long, env = "RATELENS_CORS_ALLOW", default_value = "*")]
    cors_allow: String,

    /// Request timeout in seconds
    #[arg(long, env = "RATELENS_REQUEST_TIMEOUT_SECS", default_value = "60")]
    request_timeout_secs: u64,

    /// Largest accepted request body in bytes
    #[arg(long, env = "RATELENS_BODY_LIMIT", default_value_t = DEFAULT_BODY_LIMIT)]
    body_limit: usize,

    /// Upstream rate source base URL
    #[arg(long, env = "RATELENS_UPSTREAM_URL")]
    upstream_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "RATELENS_UPSTREAM_TIMEOUT_SECS", default_value = "30")]
    upstream_timeout_secs: u64,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        let mut upstream = ClientConfig {
            timeout: Duration::from_secs(self.upstream_timeout_secs),
            ..ClientConfig::default()
        };
        if let Some(url) = self.upstream_url {
            upstream = upstream.with_base_url(url);
        }

        ServerConfig {
            listen_addr: self.listen,
            database_url: self.database_url.filter(|url| !url.trim().is_empty()),
            pool_size: self.pool_size,
            cors_allow: parse_origins(&self.cors_allow),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            body_limit: self.body_limit,
            upstream,
        }
    }
}

/// Runs the HTTP API server.
pub(crate) async fn serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config();
    let state = build_state(&config).await?;
    let router = app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on {}", config.listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn test_config_from_flags() {
        let harness = Harness::parse_from([
            "ratelens",
            "--listen",
            "127.0.0.1:9000",
            "--cors-allow",
            "http://a.test,http://b.test",
            "--upstream-url",
            "http://localhost:8080",
            "--database-url",
            "",
        ]);
        let config = harness.args.into_config();

        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.cors_allow.len(), 2);
        assert!(!config.allows_any_origin());
        assert_eq!(config.upstream.base_url, "http://localhost:8080");
        assert!(config.database_url.is_none());
    }
}
