//! Pulse API Server
//!
//! This crate provides the HTTP server for the Pulse climate data API. It
//! serves time-series CO2 and CH4 measurements from PostgreSQL, translating
//! untrusted URL query parameters into parameterized SQL through the
//! pipeline in the `shared` crate.
//!
//! # Architecture
//!
//! The API server is built on Axum and Tokio, providing:
//! - REST endpoints for each dataset and filter target
//! - Lazy, mutex-guarded database connection management
//! - Per-request ids echoed in every response envelope
//!
//! # Example
//!
//! ```no_run
//! use api::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod db;
mod error;
mod request_id;
mod routes;
mod state;

pub use config::Config;
pub use db::{Database, DatabaseConfig, DbError};
pub use error::ApiError;
pub use request_id::RequestId;
pub use state::AppState;

use anyhow::Result;
use axum::http::{header, HeaderValue};
use axum::{middleware, Router};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on one request, including database time.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the Pulse API server.
///
/// This function initializes the server with configuration from environment
/// variables and starts listening for incoming connections. It handles
/// graceful shutdown on SIGTERM/SIGINT signals.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    let state = AppState::with_config(DatabaseConfig::from_env()?);
    run_server_with_config(config, state).await
}

/// Runs the Pulse API server with the provided configuration and state.
///
/// This is useful for testing or when you want to provide configuration
/// programmatically.
///
/// # Errors
///
/// Returns an error if:
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config, state: AppState) -> Result<()> {
    let addr = config.socket_addr();

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Pulse API server starting"
    );

    // A dead database is not fatal at startup; requests reconnect lazily.
    if let Err(err) = state.database().probe().await {
        tracing::warn!(error = %err, "database unavailable at startup, will retry per request");
    }

    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a
/// full server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::index_routes())
        .merge(routes::health_routes())
        .merge(routes::co2_routes(state.clone()))
        .merge(routes::ch4_routes(state))
        .layer(middleware::from_fn(request_id::set_request_id))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
