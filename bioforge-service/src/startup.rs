//! Application startup and lifecycle management.
//!
//! Wires configured providers into the relay, builds the HTTP router and
//! runs it until a shutdown signal arrives.

use crate::config::{BioforgeConfig, GenerationBackend, SearchBackend};
use crate::handlers;
use crate::services::providers::{
    ChatCompletionsConfig, ChatCompletionsProvider, GenerationProvider, MockGenerationProvider,
    MockReply, MockSearchProvider, SearchProvider, TavilyConfig, TavilyProvider,
};
use crate::services::Relay;
use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use reqwest::Client;
use service_core::error::AppError;
use service_core::middleware::{
    cors_layer, http_trace_layer, metrics_middleware, request_id_middleware,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BioforgeConfig>,
    pub relay: Relay,
}

impl AppState {
    pub fn new(config: BioforgeConfig, relay: Relay) -> Self {
        Self {
            config: Arc::new(config),
            relay,
        }
    }
}

/// Explicit `OPTIONS` answer for clients that skip the CORS preflight headers.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Build the HTTP router with all middleware applied.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/generate", post(handlers::generate).options(preflight))
        .route(
            "/search-evidence",
            post(handlers::search_evidence).options(preflight),
        )
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(cors)
}

/// One pooled HTTP client shared by all providers, bounded by the upstream
/// timeout.
pub fn build_http_client(config: &BioforgeConfig) -> Result<Client, AppError> {
    Client::builder()
        .timeout(config.upstream_timeout)
        .build()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Failed to create HTTP client: {}", e))
        })
}

/// Instantiate the configured generation and search providers.
pub fn build_relay(config: &BioforgeConfig, client: Client) -> Relay {
    let generation: Arc<dyn GenerationProvider> = match config.generation.backend {
        GenerationBackend::Mock => {
            tracing::warn!("Using mock generation provider");
            Arc::new(MockGenerationProvider::new(MockReply::Echo))
        }
        backend => Arc::new(ChatCompletionsProvider::new(
            ChatCompletionsConfig {
                backend,
                api_key: config.generation.api_key.clone(),
                base_url: config.generation.base_url.clone(),
                referer: config.generation.referer.clone(),
                title: config.generation.title.clone(),
            },
            client.clone(),
        )),
    };

    let search: Arc<dyn SearchProvider> = match config.search.backend {
        SearchBackend::Mock => {
            tracing::warn!("Using mock search provider");
            Arc::new(MockSearchProvider::canned())
        }
        SearchBackend::Tavily => Arc::new(TavilyProvider::new(
            TavilyConfig {
                api_key: config.search.api_key.clone(),
                base_url: config.search.base_url.clone(),
            },
            client,
        )),
    };

    tracing::info!(
        generation = generation.name(),
        generation_base_url = %config.generation.base_url,
        search = search.name(),
        timeout_secs = config.upstream_timeout.as_secs(),
        "Initialized providers"
    );

    Relay::new(generation, search)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: BioforgeConfig) -> Result<Self, AppError> {
        let client = build_http_client(&config)?;
        let relay = build_relay(&config, client);
        Self::with_relay(config, relay).await
    }

    /// Build the application around an already constructed relay.
    pub async fn with_relay(config: BioforgeConfig, relay: Relay) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("BioForge service: HTTP on port {}", port);

        let router = build_router(AppState::new(config, relay));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
