//! HTTP shell for the chat pipeline.
//!
//! Two routes only: `POST /chat` and the `GET /` health probe. Every pipeline
//! failure mode is encoded in the `reply` string with a 200 status, never as
//! an error status code.

use std::{env, error::Error, sync::Arc};

mod core;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::CorsLayer;

use crate::core::app_state::AppState;
use crate::routes::{chat::chat_route::chat, health_route::health};

pub async fn start() -> Result<(), Box<dyn Error>> {
    let state = Arc::new(AppState::from_env()?);

    let port = env::var("PORT").unwrap_or_else(|_| "8000".into());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/", get(health))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    // Wait for the Ctrl+C signal
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
