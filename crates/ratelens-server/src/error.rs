//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ratelens_format::FormatError;
use ratelens_types::{DateRangeError, PeriodParseError, RatelensError, ReshapeError};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or invalid request.
    #[error("{0}")]
    BadRequest(String),
    /// A required backing service is not configured.
    #[error("{0}")]
    Unavailable(String),
    /// Unexpected failure.
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            detail: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<DateRangeError> for ApiError {
    fn from(err: DateRangeError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<PeriodParseError> for ApiError {
    fn from(err: PeriodParseError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ReshapeError> for ApiError {
    fn from(err: ReshapeError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<RatelensError> for ApiError {
    fn from(err: RatelensError) -> Self {
        match err {
            RatelensError::Persistence(_)
            | RatelensError::Io(_)
            | RatelensError::Json(_)
            | RatelensError::Upstream(_) => Self::Internal(err.to_string()),
            _ => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<FormatError> for ApiError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Reshape(e) => e.into(),
            FormatError::Csv(e) => Self::BadRequest(format!("Invalid CSV: {e}")),
            FormatError::Io(_) | FormatError::Json(_) => Self::Internal(err.to_string()),
        }
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::BadRequest("Start date must be before end date".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Start date must be before end date");
    }

    #[test]
    fn test_schema_error_is_bad_request() {
        let err: ApiError = FormatError::Reshape(ReshapeError::Schema {
            missing: vec!["Rate"],
        })
        .into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("missing: Rate")));
    }

    #[test]
    fn test_no_currencies_is_bad_request() {
        assert!(matches!(
            ApiError::from(RatelensError::NoCurrencies),
            ApiError::BadRequest(_)
        ));
    }
}
