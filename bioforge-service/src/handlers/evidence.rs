use axum::{body::Bytes, extract::State, Json};

use super::lenient_json;
use crate::error::RelayError;
use crate::models::{EvidenceRequest, EvidenceResponse};
use crate::startup::AppState;

/// `POST /search-evidence` with `{effect}`.
#[tracing::instrument(skip(state, body))]
pub async fn search_evidence(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EvidenceResponse>, RelayError> {
    let request = EvidenceRequest::from_json(&lenient_json(&body));
    let evidence = state.relay.search_evidence(request).await?;
    Ok(Json(EvidenceResponse { evidence }))
}
