//! Order handlers (trade, cancel, engine status)
//!
//! Each handler reads the raw body, runs it through the order service and
//! relays the engine's answer. Successful responses carry the engine's
//! status and body untouched.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{State, rejection::BytesRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::super::error::GatewayError;
use super::super::services::EngineResponse;
use super::super::types::ErrorEnvelope;
use super::super::state::AppState;

/// Turn a body-read rejection into an envelope carrying the rejection's status
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, GatewayError> {
    body.map_err(|e| GatewayError::Body {
        status: e.status(),
        message: e.body_text(),
    })
}

/// Relay an engine response to the caller.
///
/// The body was fully read from the engine already; once the status is
/// written, the only failure left is the caller hanging up, which the
/// server drops.
fn relay(op: &str, resp: EngineResponse) -> Response {
    tracing::debug!(
        "Relaying {} response: status {} ({} bytes)",
        op,
        resp.status,
        resp.body.len()
    );
    let mut response = Response::new(Body::from(resp.body));
    *response.status_mut() = resp.status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

/// Place a new order
///
/// POST /api/v1/trade
#[utoipa::path(
    post,
    path = "/api/v1/trade",
    request_body(content = crate::gateway::types::ClientOrder, description = "New order", content_type = "application/json"),
    responses(
        (status = 200, description = "Engine response, relayed as-is", content_type = "application/json"),
        (status = 400, description = "Invalid order", body = crate::gateway::types::ErrorEnvelope),
        (status = 500, description = "Engine unreachable or internal failure", body = crate::gateway::types::ErrorEnvelope)
    ),
    tag = "Trading"
)]
pub async fn trade(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, GatewayError> {
    let body = read_body(body)?;
    let placed = state.order_service().place_order(&body).await?;
    Ok(relay("trade", placed.engine))
}

/// Cancel an order
///
/// POST /api/v1/cancel
#[utoipa::path(
    post,
    path = "/api/v1/cancel",
    request_body(content = crate::gateway::types::ClientCancel, description = "Cancel request", content_type = "application/json"),
    responses(
        (status = 200, description = "Engine response, relayed as-is", content_type = "application/json"),
        (status = 400, description = "Missing or zero order id", body = crate::gateway::types::ErrorEnvelope),
        (status = 500, description = "Engine unreachable or internal failure", body = crate::gateway::types::ErrorEnvelope)
    ),
    tag = "Trading"
)]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, GatewayError> {
    let body = read_body(body)?;
    let resp = state.order_service().cancel_order(&body).await?;
    Ok(relay("cancel", resp))
}

/// Engine book summary
///
/// GET /api/v1/status
#[utoipa::path(
    get,
    path = "/api/v1/status",
    responses(
        (status = 200, description = "Engine status, relayed as-is", content_type = "application/json"),
        (status = 500, description = "Engine unreachable", body = crate::gateway::types::ErrorEnvelope)
    ),
    tag = "Market"
)]
pub async fn engine_status(State(state): State<Arc<AppState>>) -> Result<Response, GatewayError> {
    let resp = state.order_service().engine_status().await?;
    Ok(relay("status", resp))
}

/// Fallback for unknown paths, so they also get an envelope
pub async fn not_found() -> impl IntoResponse {
    ErrorEnvelope::new(StatusCode::NOT_FOUND, "Not found")
}

/// Fallback for a known path called with the wrong method
pub async fn method_not_allowed() -> impl IntoResponse {
    ErrorEnvelope::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
