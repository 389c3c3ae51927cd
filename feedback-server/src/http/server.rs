//! Axum server setup
//!
//! Server skeleton with:
//! - CORS allow-list of origins
//! - Tracing middleware
//! - JSON 404/405/500 fallbacks
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the store is closed

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::db::FeedbackStore;

/// Origins allowed when none are configured
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];

/// Path prefix when none is configured
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Prefix every route is mounted under (default: /api)
    pub api_prefix: String,

    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn FeedbackStore>,
}

impl AppState {
    pub fn new(store: impl FeedbackStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Normalize a route prefix to `/segment` form; empty means root.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Result<Router, ServerError> {
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ServerError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(routes::health::router())
        .merge(routes::feedback::router())
        .method_not_allowed_fallback(routes::fallback::method_not_allowed);

    let prefix = normalize_prefix(&config.api_prefix);
    let app = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&prefix, api)
    };

    Ok(app
        .fallback(routes::fallback::not_found)
        // Submissions are not size-capped
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn handle_panic(_: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    ApiError::Internal.into_response()
}

/// Run the HTTP server until a shutdown signal, then close the store.
///
/// The store is closed on every exit path, including bind failures.
///
/// # Example
///
/// ```ignore
/// let repo = FeedbackRepo::initialize(options).await?;
/// run_server(Arc::new(AppState::new(repo)), ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: Arc<AppState>, config: ServerConfig) -> Result<(), ServerError> {
    let result = serve(state.clone(), &config).await;
    state.store.close().await;
    result
}

async fn serve(state: Arc<AppState>, config: &ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, config)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        "API available at http://{}{}",
        config.bind_addr,
        normalize_prefix(&config.api_prefix)
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}
