//! Stand-in matching engine for local development
//!
//! Usage:
//!   cargo run --bin stub_engine -- [--port 6060] [--delay-ms 0]

use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn arg_value(name: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1).cloned())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let port: u16 = match arg_value("--port") {
        Some(p) => p.parse().context("--port must be a port number")?,
        None => 6060,
    };
    let delay_ms: u64 = match arg_value("--delay-ms") {
        Some(d) => d.parse().context("--delay-ms must be an integer")?,
        None => 0,
    };

    let addr = format!("127.0.0.1:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Stub engine listening on http://{} (delay {} ms)", addr, delay_ms);

    let app = order_gateway::gateway::stub_engine::router(Duration::from_millis(delay_ms));
    axum::serve(listener, app).await.context("Stub engine error")
}
