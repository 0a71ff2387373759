use std::env;

mod core;
mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;

pub use crate::core::app_state::{AppState, HealthState};
pub use crate::error_handler::AppError;
use crate::routes::{chat::chat_route::chat, health_route::health};

/// Builds the application router over a fully constructed [`AppState`].
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds the listener and serves until Ctrl+C.
///
/// The bind address comes from `API_ADDRESS` (default `127.0.0.1:8080`).
pub async fn start(state: AppState) -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".into());

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    tracing::info!(address = %host_url, "listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    // Wait for the Ctrl+C signal
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
