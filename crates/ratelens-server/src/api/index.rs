use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct ServiceInfo {
    message: &'static str,
    version: &'static str,
    data_source: &'static str,
    endpoints: BTreeMap<&'static str, &'static str>,
}

async fn service_info() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("/", "Service information"),
        ("/currencies", "List of available currencies"),
        ("/exchange-rates", "Get exchange rates for currencies against USD"),
        ("/analyze-csv", "Analyze an uploaded Date, Currency, Rate CSV file"),
        ("/download-template", "Download the CSV template"),
        ("/db-stats", "Statistics about stored rates"),
    ]);
    Json(ServiceInfo {
        message: "Currency Exchange Rate API",
        version: env!("CARGO_PKG_VERSION"),
        data_source: "Frankfurter API (European Central Bank)",
        endpoints,
    })
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(service_info))
}
