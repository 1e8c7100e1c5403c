//! Relay server setup: shared state, router, and listener

use axum::{
    extract::State,
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handler::ChatHandler;
use crate::config::AppConfig;

/// Shared state for the relay
///
/// `api_key` is read from the environment once at startup and is read-only
/// afterwards; presence is checked per request so a missing key surfaces as a
/// configuration error on each call rather than a crash at boot.
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<AppConfig>,
    pub http_client: reqwest::Client,
    pub api_key: Option<String>,
}

impl RelayState {
    pub fn new(config: AppConfig, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let http_client = build_http_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            http_client,
            api_key,
        })
    }
}

/// Build the HTTP client used for upstream calls
fn build_http_client(config: &AppConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream.timeout_seconds))
        .pool_max_idle_per_host(10)
        .build()
}

/// Build the relay router
pub fn app(state: RelayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // `any` so the handler owns the 405 response body for non-POST methods
        .route("/chat", any(chat_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay server
pub async fn run_server(
    config: AppConfig,
    api_key: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let upstream = config.upstream.base_url().to_string();

    let state = RelayState::new(config, api_key)?;
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("chat-relay listening on {}", addr);
    tracing::info!("Relaying to {}", upstream);

    Ok(axum::serve(listener, app).await?)
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Chat relay endpoint
async fn chat_handler(
    State(state): State<RelayState>,
    req: axum::extract::Request,
) -> axum::response::Response {
    let handler = ChatHandler::new(state);
    handler.handle(req).await
}
