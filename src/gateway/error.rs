//! Gateway error taxonomy
//!
//! Every failure on the intake path is one of three kinds:
//! - [`ValidationError`]: the caller sent something wrong. Safe to echo back.
//! - translation failure: encoding a validated request failed. Internal.
//! - [`ForwardError`]: the engine could not be reached or did not answer.
//!   Internal, the cause is logged and never shown to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::types::response::{ErrorEnvelope, report_client_error, report_internal_error};

/// Caller-caused rejection. The message is returned to the client verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    Malformed(String),

    #[error("Unknown side '{0}', expected buy or sell")]
    UnknownSide(String),

    #[error("Unknown trade type '{0}', expected limit, market, gtc or fak")]
    UnknownTradeType(String),

    #[error("Quantity must be greater than zero")]
    ZeroQuantity,

    #[error("{0} field is required, and cannot be empty")]
    EmptyBook(&'static str),

    #[error("orderid field is required, and cannot be zero")]
    MissingOrderId,
}

/// Failure talking to the matching engine before a full response was read.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("engine request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to connect to engine at {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("engine request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read engine response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid engine url: {0}")]
    Url(String),

    #[error("failed to create engine HTTP client")]
    Client(#[source] reqwest::Error),
}

impl ForwardError {
    /// Classify a `reqwest` send error for the given endpoint.
    pub fn from_send(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            ForwardError::Timeout { url, source }
        } else if source.is_connect() {
            ForwardError::Connect { url, source }
        } else {
            ForwardError::Transport { url, source }
        }
    }
}

/// Any failure that ends a gateway request with an error envelope.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to encode engine request: {0}")]
    Translation(String),

    #[error(transparent)]
    Forward(#[from] ForwardError),

    /// The request body could not be read (too large, client aborted).
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl GatewayError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, GatewayError::Validation(_) | GatewayError::Body { .. })
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if !self.is_client_error() {
            tracing::error!("Request failed: {}", error_chain(&self));
            return report_internal_error().into_response();
        }

        tracing::warn!("Rejected request: {}", self);
        match self {
            GatewayError::Body { status, message } => {
                ErrorEnvelope::new(status, message).into_response()
            }
            rejected => report_client_error(&rejected).into_response(),
        }
    }
}

/// Render an error with all of its sources, for the diagnostic log only.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
