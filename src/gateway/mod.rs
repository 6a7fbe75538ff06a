//! HTTP gateway in front of the matching engine
//!
//! ```text
//! client ──JSON──▶ handlers ──▶ OrderService ──form──▶ engine
//!                     ▲            │  decode/validate
//!                     │            │  allocate order id (trade only)
//!                     │            │  translate
//!                     └── relay ◀──┘  forward
//! ```

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod order_id;
pub mod services;
pub mod state;
#[cfg(any(test, feature = "stub-engine"))]
pub mod stub_engine;
pub mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use order_id::OrderIdAllocator;
use services::EngineForwarder;
use state::AppState;

/// Build the gateway router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::engine_status))
        .route("/trade", post(handlers::trade))
        .route("/cancel", post(handlers::cancel))
        .method_not_allowed_fallback(handlers::method_not_allowed);

    Router::new()
        .nest("/api/v1", api)
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Build the shared state from configuration
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let engine = EngineForwarder::from_config(&config.engine)
        .context("Failed to create matching engine client")?;
    let order_ids = OrderIdAllocator::starting_at(config.gateway.order_id_start);
    Ok(AppState::new(order_ids, engine))
}

/// Start HTTP Gateway server and run until Ctrl-C
pub async fn run_server(config: &AppConfig, port: u16) -> anyhow::Result<()> {
    let app = build_router(build_state(config)?);

    let addr = format!("{}:{}", config.gateway.host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {} (port already in use?)", addr))?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!(
        "Forwarding to matching engine at {} (timeout {} ms)",
        config.engine.base_url,
        config.engine.timeout_ms
    );
    tracing::info!("First order id: {}", config.gateway.order_id_start);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
