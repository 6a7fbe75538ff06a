//! Response types and the error reporter
//!
//! - `ErrorEnvelope`: the body of every failed request
//! - `report_client_error` / `report_internal_error`: the only ways to build one
//! - `ApiResponse<T>`: wrapper for the gateway's own (non-proxied) endpoints

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message returned for every internal failure, whatever the cause.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

// ============================================================================
// Error Envelope
// ============================================================================

/// Client-visible error body: `{"Code": 400, "Message": "..."}`
///
/// `Code` always equals the HTTP status written with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorEnvelope {
    #[schema(example = 400)]
    pub code: u16,
    #[schema(example = "orderid field is required, and cannot be zero")]
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Envelope for a caller-caused failure. The message describes what the
/// caller did wrong and is safe to expose.
pub fn report_client_error(err: &impl std::fmt::Display) -> ErrorEnvelope {
    ErrorEnvelope {
        code: StatusCode::BAD_REQUEST.as_u16(),
        message: err.to_string(),
    }
}

/// Envelope for an internal failure. Takes no cause on purpose: the cause
/// belongs in the log, not in the response.
pub fn report_internal_error() -> ErrorEnvelope {
    ErrorEnvelope {
        code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        message: INTERNAL_ERROR_MESSAGE.to_string(),
    }
}

// ============================================================================
// Gateway-owned responses
// ============================================================================

/// Wrapper for endpoints answered by the gateway itself
///
/// - code: 0 = success
/// - msg: short message description
/// - data: payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = 0)]
    pub code: i32,
    #[schema(example = "ok")]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::error::ValidationError;

    #[test]
    fn test_envelope_serializes_pascal_case() {
        let env = report_client_error(&ValidationError::ZeroQuantity);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["Code"], 400);
        assert_eq!(json["Message"], "Quantity must be greater than zero");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_client_error_is_4xx_with_derived_message() {
        let env = report_client_error(&ValidationError::MissingOrderId);
        assert!(env.status().is_client_error());
        assert_eq!(env.message, ValidationError::MissingOrderId.to_string());
    }

    #[test]
    fn test_internal_error_is_fixed() {
        let a = report_internal_error();
        let b = report_internal_error();
        assert_eq!(a, b);
        assert_eq!(a.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(a.message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_envelope_response_status_matches_code() {
        let resp = report_client_error(&"bad").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let ct = resp.headers().get(axum::http::header::CONTENT_TYPE).unwrap();
        assert_eq!(ct, "application/json");
    }
}
