//! Response testing and assertions.
//!
//! This module provides the expectations a scenario can run against its
//! captured response.

use serde::{Deserialize, Serialize};

use crate::schema::SchemaVariant;

/// A test assertion to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response time is strictly below a threshold.
    ResponseTimeBelow {
        /// Exclusive upper bound in milliseconds.
        max_ms: u64,
    },
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check header value.
    Header {
        /// Header name (case-insensitive).
        name: String,
        /// Expected value (exact match).
        value: String,
    },
    /// Check the body validates against a response schema.
    MatchesSchema {
        /// Which schema variant to use.
        variant: SchemaVariant,
    },
    /// Check JSON path value.
    JsonPath {
        /// JSONPath expression (e.g., "$.response.clientId").
        path: String,
        /// Expected value (as JSON).
        expected: serde_json::Value,
    },
}

impl Assertion {
    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::ResponseTimeBelow { max_ms } => format!("Response time < {max_ms}ms"),
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::Header { name, value } => format!("Header '{name}' equals '{value}'"),
            Self::MatchesSchema { variant } => format!("Body matches {variant} schema"),
            Self::JsonPath { path, expected } => format!("JSON {path} equals {expected}"),
        }
    }

    /// Expectation on the echoed `response.clientId`.
    #[must_use]
    pub fn client_id(expected: impl Into<String>) -> Self {
        Self::JsonPath {
            path: "$.response.clientId".to_string(),
            expected: serde_json::Value::String(expected.into()),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }

    /// One-line summary suitable for a failure report.
    #[must_use]
    pub fn summary(&self) -> String {
        let status = if self.passed { "passed" } else { "failed" };
        match (&self.error, &self.actual) {
            (Some(error), _) => format!("{} {status}: {error}", self.assertion.description()),
            (None, Some(actual)) => {
                format!("{} {status} (actual: {actual})", self.assertion.description())
            }
            (None, None) => format!("{} {status}", self.assertion.description()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_description() {
        let assertion = Assertion::StatusCode { expected: 200 };
        assert_eq!(assertion.description(), "Status code = 200");

        let assertion = Assertion::ResponseTimeBelow { max_ms: 15000 };
        assert_eq!(assertion.description(), "Response time < 15000ms");

        let assertion = Assertion::MatchesSchema {
            variant: SchemaVariant::Success,
        };
        assert_eq!(assertion.description(), "Body matches success schema");
    }

    #[test]
    fn test_client_id_assertion() {
        let assertion = Assertion::client_id("e-health-service");
        assert_eq!(
            assertion.description(),
            r#"JSON $.response.clientId equals "e-health-service""#
        );
    }

    #[test]
    fn test_result_summary() {
        let result = AssertionResult::fail_with_value(
            Assertion::StatusCode { expected: 200 },
            "400",
            "Expected status 200, got 400",
        );
        assert!(!result.passed);
        assert_eq!(
            result.summary(),
            "Status code = 200 failed: Expected status 200, got 400"
        );

        let result = AssertionResult::pass_with_value(Assertion::StatusCode { expected: 200 }, "200");
        assert_eq!(result.summary(), "Status code = 200 passed (actual: 200)");
    }

    #[test]
    fn test_assertion_serde_tag() {
        let json = serde_json::to_value(Assertion::StatusCode { expected: 201 })
            .unwrap_or_default();
        assert_eq!(json["type"], "status_code");
        assert_eq!(json["expected"], 201);
    }
}
