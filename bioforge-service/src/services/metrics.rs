//! Prometheus metrics for bioforge-service.
//!
//! Two sources are rendered together at `/metrics`: the `metrics` crate
//! recorder fed by the shared HTTP middleware, and a `prometheus` registry
//! holding relay and provider metrics.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::{Once, OnceLock};

static INIT: Once = Once::new();

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static RELAY_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static RELAY_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static RELAY_PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    INIT.call_once(|| {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                let _ = METRICS_HANDLE.set(handle);
            }
            Err(e) => tracing::warn!(error = %e, "Prometheus recorder not installed"),
        }

        let registry = Registry::new();

        // Relay outcomes per operation
        let relay_requests = IntCounterVec::new(
            Opts::new("relay_requests_total", "Total relay requests by outcome"),
            &["operation", "outcome"],
        )
        .expect("Failed to create relay_requests_total metric");

        // Provider latency histogram
        let provider_latency = HistogramVec::new(
            HistogramOpts::new(
                "relay_provider_latency_seconds",
                "Upstream provider call latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
            &["provider", "operation"],
        )
        .expect("Failed to create relay_provider_latency_seconds metric");

        // Provider error counter
        let provider_errors = IntCounterVec::new(
            Opts::new("relay_provider_errors_total", "Total upstream provider errors"),
            &["provider", "kind"],
        )
        .expect("Failed to create relay_provider_errors_total metric");

        registry
            .register(Box::new(relay_requests.clone()))
            .expect("Failed to register relay_requests_total");
        registry
            .register(Box::new(provider_latency.clone()))
            .expect("Failed to register relay_provider_latency_seconds");
        registry
            .register(Box::new(provider_errors.clone()))
            .expect("Failed to register relay_provider_errors_total");

        let _ = REGISTRY.set(registry);
        let _ = RELAY_REQUESTS_TOTAL.set(relay_requests);
        let _ = RELAY_PROVIDER_LATENCY_SECONDS.set(provider_latency);
        let _ = RELAY_PROVIDER_ERRORS_TOTAL.set(provider_errors);

        tracing::info!("Prometheus metrics initialized");
    });
}

/// Get metrics in Prometheus text format, or `None` before [`init_metrics`].
pub fn get_metrics() -> Option<String> {
    let registry = REGISTRY.get()?;

    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return Some(output);
    }

    match String::from_utf8(buffer) {
        Ok(s) => output.push_str(&s),
        Err(e) => tracing::error!(error = %e, "Failed to convert metrics to UTF-8"),
    }

    Some(output)
}

/// Record a finished relay request. `outcome` is `ok` or an error kind.
pub fn record_relay_request(operation: &str, outcome: &str) {
    if let Some(counter) = RELAY_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[operation, outcome]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, operation: &str, duration_secs: f64) {
    if let Some(histogram) = RELAY_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, operation])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, kind: &str) {
    if let Some(counter) = RELAY_PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, kind]).inc();
    }
}
