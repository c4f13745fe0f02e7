use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use ratelens_types::{DateRange, Period, RatelensError, RecordFilter, from_long_format, normalize_code};
use serde::Deserialize;

use crate::{AppState, CurrencyResponse, analyze_table, error::ApiResult};

#[derive(Debug, Deserialize)]
struct RatesRequest {
    currencies: Vec<String>,
    start_date: String,
    end_date: String,
    #[serde(default = "default_interval")]
    interval: String,
}

fn default_interval() -> String {
    Period::Daily.as_str().to_string()
}

async fn exchange_rates(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RatesRequest>,
) -> ApiResult<Json<CurrencyResponse>> {
    let range = DateRange::parse_request(&request.start_date, &request.end_date, state.today())?;
    let currencies: Vec<String> = request
        .currencies
        .iter()
        .map(|code| normalize_code(code))
        .filter(|code| !code.is_empty())
        .collect();
    if currencies.is_empty() {
        return Err(RatelensError::NoCurrencies.into());
    }
    let period: Period = request.interval.parse()?;

    let records = match state.client.fetch_rates(&currencies, &range).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, %range, "Rate fetch failed");
            return Ok(Json(CurrencyResponse::failure(
                "Upstream rate source unavailable",
                vec![e.to_string()],
            )));
        }
    };
    if records.is_empty() {
        return Ok(Json(CurrencyResponse::failure(
            "No data found for the specified criteria",
            vec!["Failed to fetch data from the rate source".to_string()],
        )));
    }

    let table = from_long_format(records, &RecordFilter::new());
    Ok(Json(analyze_table(&table, &currencies, period)))
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/exchange-rates", post(exchange_rates))
}
