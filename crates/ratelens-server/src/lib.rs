//! HTTP service for the ratelens exchange-rate API.
//!
//! The service fetches daily rates from the upstream source or accepts
//! uploaded CSV files, resamples them and reports per-currency statistics.
//!
//! - [`ServerConfig`] - Runtime configuration
//! - [`build_state`] - Client and store wiring
//! - [`app_router`] - Routes and middleware
//! - [`prepare_upload`] / [`analyze_table`] - The analysis pipeline
//!
//! # Example
//!
//! ```no_run
//! use ratelens_server::{ServerConfig, app_router, build_state};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let state = build_state(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
//! axum::serve(listener, app_router(state, &config)).await?;
//! # Ok(())
//! # }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/ratelens/ratelens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod error;
mod pipeline;
mod response;
mod state;

pub use api::app_router;
pub use config::{DEFAULT_BODY_LIMIT, DEFAULT_PORT, ServerConfig, parse_origins};
pub use error::{ApiError, ApiResult};
pub use pipeline::{
    EMPTY_AFTER_RESAMPLE, EMPTY_UPLOAD, PreparedUpload, UploadSelection, analyze_table,
    prepare_upload,
};
pub use response::{CurrencyData, CurrencyResponse};
pub use state::{AppState, build_state};
