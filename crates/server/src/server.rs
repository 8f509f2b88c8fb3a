//! Server initialization and routing
//!
//! Router assembly, start-up model preparation and graceful shutdown.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, health, not_found, predict};
use crate::state::ServerState;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use dataset::{default_profiles, generate, GeneratorConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Middleware stack (outermost last):
/// 1. Request tracing
/// 2. Request logging
/// 3. Request ID tracking
/// 4. CORS
/// 5. Compression
/// 6. Timeout
/// 7. Body size limit
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/predict", post(predict::predict_disease))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(request_id))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Write a synthetic dataset if configured to and none exists yet.
pub fn ensure_dataset(config: &ServerConfig) -> Result<(), ServerError> {
    let path = config.predictor_config().dataset_path;
    if !config.generate_dataset_if_missing || path.exists() {
        return Ok(());
    }

    tracing::info!(path = %path.display(), "dataset missing, generating");
    let dataset = generate(&default_profiles(), &GeneratorConfig::default())
        .map_err(|e| ServerError::Internal(e.to_string()))?;
    dataset
        .write_csv(&path)
        .map_err(|e| ServerError::Internal(e.to_string()))
}

/// Prepare the model before accepting traffic.
///
/// Failures are logged; the server still starts and `/predict` retries the
/// load-or-train chain on each call until it succeeds.
pub async fn warm_up(state: &ServerState) {
    if let Err(err) = ensure_dataset(&state.config) {
        tracing::error!(error = %err, "could not generate dataset");
    }

    let predictor = Arc::clone(&state.predictor);
    match tokio::task::spawn_blocking(move || predictor.initialize()).await {
        Ok(Ok(_)) => tracing::info!(status = ?state.predictor.status(), "model ready"),
        Ok(Err(err)) => tracing::error!(error = %err, "model not ready at start-up"),
        Err(err) => tracing::error!(error = %err, "model initialization task failed"),
    }
}

/// Start the HTTP server
///
/// Blocks until SIGTERM or Ctrl+C, then drains in-flight requests.
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let addr: SocketAddr = config.socket_addr()?;
    let state = Arc::new(ServerState::new(config.clone()));
    warm_up(&state).await;

    let app = build_router(state);

    tracing::info!(%addr, "starting symptomatch server");
    tracing::info!(
        timeout_secs = config.timeout_secs,
        max_body_mb = config.max_body_size_mb,
        cors = config.enable_cors,
        "server limits"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
