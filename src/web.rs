use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, AppState};
use crate::weather::ObservationProvider;

/// Full application router, API nested under `/api`
pub fn app(provider: Arc<dyn ObservationProvider>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(AppState::new(provider)))
        .layer(cors)
}

pub async fn run(port: u16, provider: Arc<dyn ObservationProvider>) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);

    axum::serve(listener, app(provider))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server terminated unexpectedly")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down web server");
}
