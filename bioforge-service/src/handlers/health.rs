use axum::Json;

use crate::models::HealthResponse;

/// Liveness only: never touches upstream providers.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: "bioforge-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}
