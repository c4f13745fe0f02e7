use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use ratelens_store::StoreStats;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
};

async fn db_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StoreStats>> {
    let store = state
        .store
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Persistence is disabled".to_string()))?;

    let stats = store.stats().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read store statistics");
        ApiError::Internal(format!("Database error: {e}"))
    })?;
    Ok(Json(stats))
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/db-stats", get(db_stats))
}
