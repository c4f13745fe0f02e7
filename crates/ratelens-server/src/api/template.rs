use std::sync::Arc;

use axum::{
    Router,
    http::header,
    response::IntoResponse,
    routing::get,
};
use ratelens_format::{TEMPLATE_CONTENT_TYPE, TEMPLATE_FILENAME, template_csv};

use crate::{AppState, error::ApiResult};

async fn download_template() -> ApiResult<impl IntoResponse> {
    let body = template_csv().await?;
    let disposition = format!("attachment; filename={TEMPLATE_FILENAME}");
    Ok((
        [
            (header::CONTENT_TYPE, TEMPLATE_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/download-template", get(download_template))
}
