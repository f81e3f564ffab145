//! Errors surfaced by the relay endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::ErrorBody;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Required input missing or blank.
    #[error("{0}")]
    Validation(String),

    /// Provider signalled throttling.
    #[error("LLM API error: {provider} rate limited the request")]
    RateLimited { provider: &'static str },

    /// Provider call failed: non-2xx, transport failure, timeout or an
    /// undecodable body.
    #[error("{provider} request failed: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },

    /// Provider answered but gave nothing usable.
    #[error("LLM returned no usable content")]
    UpstreamEmpty,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::RateLimited { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Upstream { .. } | RelayError::UpstreamEmpty => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation",
            RelayError::RateLimited { .. } => "rate_limited",
            RelayError::Upstream { .. } => "upstream",
            RelayError::UpstreamEmpty => "upstream_empty",
        }
    }
}

impl From<ValidationErrors> for RelayError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());
        RelayError::Validation(message)
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Relay request failed");
        } else {
            tracing::info!(error = %self, "Rejected relay request");
        }

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenerationRequest;
    use validator::Validate;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            RelayError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::RateLimited {
                provider: "openrouter"
            }
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            RelayError::Upstream {
                provider: "tavily",
                message: "API error 502: bad gateway".into()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::UpstreamEmpty.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_message_comes_from_request_rules() {
        let errors = GenerationRequest::new("   ", None, None)
            .validate()
            .unwrap_err();
        assert_eq!(RelayError::from(errors).to_string(), "Missing effect input");
    }
}
