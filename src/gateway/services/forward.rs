//! Engine forwarder
//!
//! Sends an encoded operation to the matching engine and hands back the
//! engine's status and body untouched. Transport failures are classified
//! into [`ForwardError`]; the forwarder never retries.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header::CONTENT_TYPE;

use crate::config::EngineConfig;
use crate::gateway::error::ForwardError;
use crate::gateway::types::EngineOperation;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Engine response relayed to the caller as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// HTTP client for the matching engine. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EngineForwarder {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl EngineForwarder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ForwardError> {
        let mut base_url = reqwest::Url::parse(base_url)
            .map_err(|e| ForwardError::Url(format!("{}: {}", base_url, e)))?;
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(ForwardError::Client)?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ForwardError> {
        Self::new(&config.base_url, config.timeout())
    }

    /// Full URL of an engine endpoint
    pub fn endpoint(&self, op: EngineOperation) -> Result<reqwest::Url, ForwardError> {
        self.base_url
            .join(op.path())
            .map_err(|e| ForwardError::Url(format!("{}{}: {}", self.base_url, op.path(), e)))
    }

    /// POST a form-encoded body to the operation's endpoint
    pub async fn forward(
        &self,
        op: EngineOperation,
        body: String,
    ) -> Result<EngineResponse, ForwardError> {
        let url = self.endpoint(op)?;
        tracing::debug!("Forwarding {} request to engine: {} with body: {}", op.path(), url, body);

        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        self.send(url, request).await
    }

    /// GET the engine's book summary
    pub async fn fetch_status(&self) -> Result<EngineResponse, ForwardError> {
        let url = self.endpoint(EngineOperation::Status)?;
        tracing::debug!("Fetching engine status: {}", url);
        let request = self.client.get(url.clone());
        self.send(url, request).await
    }

    async fn send(
        &self,
        url: reqwest::Url,
        request: reqwest::RequestBuilder,
    ) -> Result<EngineResponse, ForwardError> {
        let response = request
            .send()
            .await
            .map_err(|e| ForwardError::from_send(url.as_str(), e))?;

        let status = response.status();
        // Buffer the whole body before anything is written to the caller, so a
        // failure here can still be reported as a clean internal error.
        let body = response.bytes().await.map_err(|source| ForwardError::Body {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!("Engine {} answered {} ({} bytes)", url, status, body.len());
        Ok(EngineResponse { status, body })
    }
}
