//! HTTP Client port

use async_trait::async_trait;
use probe_domain::{CapturedResponse, PreparedRequest};
use thiserror::Error;

/// Transport-level failures while sending a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request did not complete in time.
    #[error(
        "request timed out{}",
        .timeout_ms.map(|ms| format!(" after {ms}ms")).unwrap_or_default()
    )]
    Timeout {
        /// The per-request timeout that elapsed, if one was set.
        timeout_ms: Option<u64>,
    },

    /// Nothing is listening at the target address.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request body could not be encoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Any other transport error.
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Port for sending a prepared client-create request.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the scenario executor to be independent of specific HTTP libraries.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request and captures the response, including its
    /// round-trip time.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues or a
    /// timeout. Non-2xx statuses are not errors.
    async fn send(&self, request: &PreparedRequest) -> Result<CapturedResponse, HttpClientError>;
}
