//! Captured response type
//!
//! Holds everything observed from the single request a scenario sends:
//! status, headers, body and round-trip time.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

/// HTTP response captured by a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as received.
    ///
    /// A repeated header keeps only its last value.
    pub headers: HashMap<String, String>,
    /// Raw body as text.
    pub body: String,
    /// Body parsed as JSON, if it parsed.
    pub json: Option<Value>,
    /// Round-trip time of the request.
    pub duration: Duration,
}

impl CapturedResponse {
    /// Creates a new `CapturedResponse` from raw response data.
    ///
    /// The body is decoded lossily and parsed as JSON when possible.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: &[u8],
        duration: Duration,
    ) -> Self {
        let body = String::from_utf8_lossy(body).into_owned();
        let json = serde_json::from_str(&body).ok();

        Self {
            status,
            headers,
            body,
            json,
            duration,
        }
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the round-trip time in whole milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }

    /// Returns the `response.clientId` echoed by the service, if present.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.json.as_ref()?.get("response")?.get("clientId")?.as_str()
    }

    /// Returns a short preview of the body for failure messages.
    #[must_use]
    pub fn body_preview(&self) -> String {
        const LIMIT: usize = 100;
        match self.body.char_indices().nth(LIMIT) {
            Some((cut, _)) => format!("{}...", &self.body[..cut]),
            None => self.body.clone(),
        }
    }
}
