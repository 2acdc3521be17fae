//! A request ready to be dispatched

use url::Url;
use uuid::Uuid;

use super::ClientCreateRequest;

/// A `POST` of a client-create body to a resolved endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Identifier used to correlate log lines.
    pub id: Uuid,
    /// Resolved endpoint URL.
    pub url: Url,
    /// JSON body.
    pub body: ClientCreateRequest,
    /// Per-request timeout; `None` keeps the transport default.
    pub timeout_ms: Option<u64>,
}

impl PreparedRequest {
    /// Creates a request for the given endpoint and body.
    #[must_use]
    pub fn new(url: Url, body: ClientCreateRequest) -> Self {
        Self {
            id: Uuid::now_v7(),
            url,
            body,
            timeout_ms: None,
        }
    }

    /// Sets the per-request timeout (builder pattern).
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
