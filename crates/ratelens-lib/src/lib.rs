//! Exchange-rate retrieval, CSV analysis and persistence.
//!
//! This is a facade crate that re-exports functionality from the ratelens
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use ratelens_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RatesClient::with_defaults()?;
//!     let range = DateRange::parse_request("2024-01-01", "2024-03-31", chrono::Utc::now().date_naive())?;
//!
//!     let records = client.fetch_rates(&["EUR", "GBP"], &range).await?;
//!     let table = from_long_format(records, &RecordFilter::new());
//!
//!     let summary = Summary::analyze(&table, ["EUR", "GBP"], Period::Monthly);
//!     println!("{}", summary.message());
//!
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/ratelens/ratelens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use ratelens_types::*;

// Re-export currency registry
pub use ratelens_currencies::CurrencyRegistry;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use ratelens_fetch::{ClientConfig, FetchError, ParseError, RatesClient};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use ratelens_aggregate::{
    AnalysisStatus, FailureReason, Resampler, SeriesFailure, SeriesOutcome, SeriesStatistics,
    Summary, aggregate, resample,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use ratelens_format::{
    CsvFormatter, FormatError, Formatter, NdjsonFormatter, Upload, read_upload, read_upload_bytes,
    template_csv,
};

// Re-export persistence
#[cfg(feature = "store")]
pub use ratelens_store::{ImportAudit, PgRateStore, RateRepository, StoreError, StoreStats};

#[cfg(feature = "memory")]
pub use ratelens_store::InMemoryRateStore;

// Re-export the HTTP service
#[cfg(feature = "server")]
pub use ratelens_server::{
    ApiError, AppState, CurrencyData, CurrencyResponse, DEFAULT_BODY_LIMIT, DEFAULT_PORT,
    EMPTY_UPLOAD, PreparedUpload, ServerConfig, UploadSelection, analyze_table, app_router,
    build_state, parse_origins, prepare_upload,
};

/// Prelude module for convenient imports.
///
/// ```
/// use ratelens_lib::prelude::*;
/// ```
pub mod prelude {
    pub use ratelens_types::{
        Currency, DateRange, DateRangeError, Period, RateRecord, RatelensError, RecordFilter,
        Result, SeriesTable, from_long_format, to_long_format,
    };

    pub use ratelens_currencies::CurrencyRegistry;

    #[cfg(feature = "fetch")]
    pub use ratelens_fetch::{ClientConfig, RatesClient};

    #[cfg(feature = "aggregate")]
    pub use ratelens_aggregate::{AnalysisStatus, Resampler, SeriesStatistics, Summary};

    #[cfg(feature = "format")]
    pub use ratelens_format::{CsvFormatter, Formatter, NdjsonFormatter, Upload};

    #[cfg(feature = "store")]
    pub use ratelens_store::RateRepository;

    #[cfg(feature = "server")]
    pub use ratelens_server::{ServerConfig, app_router, build_state};
}
