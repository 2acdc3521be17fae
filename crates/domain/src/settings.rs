//! Harness settings domain model
//!
//! Values shared by every scenario: where the service lives, how fast it must
//! answer, and which content type it must declare.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default base host of the service under test.
pub const DEFAULT_BASE_HOST: &str = "http://localhost:8088/";
/// Path of the client-create endpoint, relative to the base host.
pub const CLIENT_CREATE_ENDPOINT: &str = "client-mgmt/oidc-client";
/// Default response-time threshold in milliseconds.
pub const DEFAULT_RESPONSE_TIME_MS: u64 = 15_000;

/// Expected header name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExpectation {
    /// Header name.
    pub key: String,
    /// Exact expected value.
    pub value: String,
}

impl Default for HeaderExpectation {
    fn default() -> Self {
        Self {
            key: "content-type".to_string(),
            value: "application/json".to_string(),
        }
    }
}

/// Settings shared by all scenarios of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessSettings {
    /// Base URL of the service under test.
    pub base_host: String,
    /// Endpoint path relative to `base_host`.
    pub endpoint: String,
    /// Response-time threshold in milliseconds (exclusive).
    pub response_time_ms: u64,
    /// Expected content-type header.
    pub content_type: HeaderExpectation,
    /// Optional JSON file replacing the built-in response schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    /// Optional per-request timeout; the HTTP client default applies otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            base_host: DEFAULT_BASE_HOST.to_string(),
            endpoint: CLIENT_CREATE_ENDPOINT.to_string(),
            response_time_ms: DEFAULT_RESPONSE_TIME_MS,
            content_type: HeaderExpectation::default(),
            schema_path: None,
            request_timeout_ms: None,
        }
    }
}

impl HarnessSettings {
    /// Creates default settings pointing at `base_host`.
    #[must_use]
    pub fn for_host(base_host: impl Into<String>) -> Self {
        Self {
            base_host: base_host.into(),
            ..Self::default()
        }
    }

    /// Resolves the endpoint URL.
    ///
    /// A missing trailing slash on the base host is tolerated so that the
    /// endpoint is appended rather than replacing the last path segment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base host or the joined URL
    /// cannot be parsed.
    pub fn endpoint_url(&self) -> DomainResult<Url> {
        let mut base = self.base_host.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| DomainError::InvalidUrl(format!("{e}: {base}")))?;
        base.join(self.endpoint.trim_start_matches('/'))
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.endpoint)))
    }

    /// Scenario tag that selects the per-scenario setup and teardown.
    #[must_use]
    pub fn endpoint_tag(&self) -> String {
        format!("endpoint=/{}", self.endpoint.trim_start_matches('/'))
    }
}
