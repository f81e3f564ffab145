use axum::{body::Bytes, extract::State, Json};

use super::lenient_json;
use crate::error::RelayError;
use crate::models::{GenerateResponse, GenerationRequest};
use crate::startup::AppState;

/// `POST /generate` with `{effect, model?, mode?}`.
#[tracing::instrument(skip(state, body))]
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, RelayError> {
    let request = GenerationRequest::from_json(&lenient_json(&body));
    let result = state.relay.generate(request).await?;
    Ok(Json(GenerateResponse { result }))
}
