use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, Query, State},
    routing::post,
};
use ratelens_format::read_upload_bytes;
use ratelens_types::{Period, parse_date};
use serde::Deserialize;

use crate::{
    AppState, CurrencyResponse, analyze_table,
    error::{ApiError, ApiResult},
    pipeline::{EMPTY_UPLOAD, UploadSelection, prepare_upload},
};

#[derive(Debug, Default, Deserialize)]
struct AnalyzeParams {
    currencies: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    interval: Option<String>,
}

/// Treats empty query values as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn empty_upload() -> CurrencyResponse {
    CurrencyResponse::failure(EMPTY_UPLOAD, vec!["Failed to process CSV data".to_string()])
}

async fn analyze_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
    multipart: Multipart,
) -> ApiResult<Json<CurrencyResponse>> {
    let period: Period = present(params.interval.as_deref())
        .map_or(Ok(Period::Daily), str::parse::<Period>)?;
    let mut selection = UploadSelection {
        start: present(params.start_date.as_deref()).map(parse_date).transpose()?,
        end: present(params.end_date.as_deref()).map(parse_date).transpose()?,
        ..UploadSelection::default()
    };
    if let Some(list) = present(params.currencies.as_deref()) {
        selection = selection.with_currency_list(list);
    }

    let (filename, bytes) = read_file_field(multipart).await?;
    let upload = read_upload_bytes(&bytes).await?;
    tracing::info!(%filename, rows = upload.len(), "CSV received");

    let Some(prepared) = prepare_upload(upload, &selection)? else {
        return Ok(Json(empty_upload()));
    };

    if let Some(store) = &state.store {
        match store.save_import(&filename, &prepared.table).await {
            Ok(Some(audit)) => {
                tracing::info!(%filename, records = audit.record_count, "Upload persisted");
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(%filename, error = %e, "Failed to persist upload"),
        }
    }

    Ok(Json(analyze_table(&prepared.table, &prepared.currencies, period)))
}

const DEFAULT_FILENAME: &str = "upload.csv";

/// Returns the file name and content of the `file` field.
async fn read_file_field(mut multipart: Multipart) -> ApiResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file content: {e}")))?;
        return Ok((filename, bytes));
    }
    Err(ApiError::BadRequest(
        "Missing file in multipart request".to_string(),
    ))
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/analyze-csv", post(analyze_csv))
}
