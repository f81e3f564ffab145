//! Tower/axum middleware shared across services.

pub mod cors;
pub mod metrics;
pub mod tracing;

pub use self::cors::{AllowedOrigins, cors_layer};
pub use self::metrics::metrics_middleware;
pub use self::tracing::{REQUEST_ID_HEADER, RequestSpan, http_trace_layer, request_id_middleware};
