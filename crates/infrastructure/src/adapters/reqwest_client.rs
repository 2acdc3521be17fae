//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It posts the client-create body as JSON and captures the response with its
//! round-trip time.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use probe_application::ports::{HttpClient, HttpClientError};
use probe_domain::{CapturedResponse, PreparedRequest};
use reqwest::Client;

/// HTTP client implementation using reqwest.
///
/// The underlying `reqwest::Client` keeps a connection pool, so one instance
/// is shared by every scenario of a run.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// No overall timeout is configured; a request only gives up when its
    /// `timeout_ms` is set or the transport fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("oidc-probe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: Option<u64>) -> HttpClientError {
        let message = error_chain(error);

        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            if message.to_lowercase().contains("refused") {
                let url = error.url();
                return HttpClientError::ConnectionRefused {
                    host: url
                        .and_then(|u| u.host_str())
                        .unwrap_or("unknown")
                        .to_string(),
                    port: url.and_then(reqwest::Url::port_or_known_default).unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_builder() {
            return HttpClientError::InvalidBody(message);
        }

        HttpClientError::Other(message)
    }
}

/// Joins an error with all of its sources; reqwest keeps the useful part
/// (e.g. "Connection refused") in the source chain.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: &PreparedRequest) -> Result<CapturedResponse, HttpClientError> {
        let mut builder = self
            .client
            .post(request.url.clone())
            .json(&request.body);

        if let Some(timeout_ms) = request.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        // Start timing
        let start = Instant::now();

        let response = builder.send().await.map_err(|e| {
            let mapped = Self::map_error(&e, request.timeout_ms);
            tracing::debug!(request = %request.id, error = %mapped, "transport error");
            mapped
        })?;

        let status = response.status().as_u16();

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {}", error_chain(&e))))?;

        // The body is part of the round trip.
        let duration = start.elapsed();

        Ok(CapturedResponse::new(status, headers, &body, duration))
    }
}
