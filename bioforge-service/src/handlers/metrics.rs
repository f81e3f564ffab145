use axum::http::header;
use axum::response::IntoResponse;
use service_core::error::AppError;

use crate::services::metrics::get_metrics;

pub async fn metrics() -> Result<impl IntoResponse, AppError> {
    let body = get_metrics().ok_or(AppError::ServiceUnavailable)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
