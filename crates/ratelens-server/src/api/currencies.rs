use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use ratelens_currencies::CurrencyRegistry;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct CurrenciesBody {
    currencies: BTreeMap<String, String>,
}

/// Serves the upstream listing, or the embedded list when upstream is
/// unreachable or lists nothing besides the base.
async fn list_currencies(State(state): State<Arc<AppState>>) -> Json<CurrenciesBody> {
    let registry = match state.client.fetch_currencies().await {
        Ok(listing) => {
            let registry = CurrencyRegistry::from_upstream(listing);
            if registry.is_empty() {
                tracing::warn!("Upstream currency listing is empty, using fallback list");
                CurrencyRegistry::fallback().clone()
            } else {
                registry
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Currency listing unavailable, using fallback list");
            CurrencyRegistry::fallback().clone()
        }
    };

    Json(CurrenciesBody {
        currencies: registry.to_map(),
    })
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/currencies", get(list_currencies))
}
