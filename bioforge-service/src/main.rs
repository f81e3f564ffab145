use bioforge_service::config::BioforgeConfig;
use bioforge_service::services::metrics::init_metrics;
use bioforge_service::startup::Application;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok().filter(|e| !e.is_empty());
    if let Err(e) = init_tracing("bioforge-service", &log_level, otlp_endpoint.as_deref()) {
        eprintln!("{}", e);
        return Err(std::io::Error::other(e.to_string()));
    }

    let config = BioforgeConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_metrics();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    let result = app.run_until_stopped().await;
    shutdown_tracing();
    result
}
