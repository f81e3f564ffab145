//! HTTP handlers for bioforge-service.

pub mod evidence;
pub mod generate;
pub mod health;
pub mod metrics;

pub use evidence::search_evidence;
pub use generate::generate;
pub use health::health_check;
pub use metrics::metrics;

use axum::body::Bytes;
use serde_json::Value;

/// Parses a request body leniently. Malformed or non-JSON bodies become
/// `null`, which then fails field validation with a `{error}` body instead of
/// an extractor rejection.
pub(crate) fn lenient_json(body: &Bytes) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring malformed JSON body");
        Value::Null
    })
}
