//! HTTP routes.

mod currencies;
mod index;
mod rates;
mod stats;
mod template;
mod upload;

use axum::{Router, extract::DefaultBodyLimit, http::HeaderValue};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{AppState, ServerConfig};

/// Builds the application router with its middleware stack.
pub fn app_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let cors = if config.allows_any_origin() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };
    let cors = cors.allow_methods(Any).allow_headers(Any);

    Router::new()
        .merge(index::router())
        .merge(currencies::router())
        .merge(rates::router())
        .merge(upload::router())
        .merge(template::router())
        .merge(stats::router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
