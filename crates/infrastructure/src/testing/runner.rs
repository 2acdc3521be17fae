//! Test runner implementation.
//!
//! Executes assertions against captured responses. Schema assertions use
//! validators compiled once from the run's [`ResponseSchemas`].

use std::fmt;

use jsonschema::Validator;
use probe_application::ports::ResponseChecker;
use probe_domain::{
    Assertion, AssertionResult, CapturedResponse, ResponseSchemas, SchemaVariant,
};
use serde_json::Value;

/// A schema document that failed to compile.
#[derive(Debug, thiserror::Error)]
#[error("{variant} schema does not compile: {message}")]
pub struct SchemaCompileError {
    /// Which variant failed.
    pub variant: SchemaVariant,
    /// Compiler message.
    pub message: String,
}

/// Test runner that executes assertions against responses.
pub struct TestRunner {
    success: Validator,
    error: Validator,
}

impl fmt::Debug for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRunner").finish_non_exhaustive()
    }
}

impl TestRunner {
    /// Create a new test runner for the given schemas.
    ///
    /// # Errors
    ///
    /// Returns an error if either schema variant is not a valid JSON Schema.
    pub fn new(schemas: &ResponseSchemas) -> Result<Self, SchemaCompileError> {
        let compile = |variant: SchemaVariant| {
            jsonschema::validator_for(schemas.get(variant)).map_err(|e| SchemaCompileError {
                variant,
                message: e.to_string(),
            })
        };

        Ok(Self {
            success: compile(SchemaVariant::Success)?,
            error: compile(SchemaVariant::Error)?,
        })
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(
        &self,
        assertion: &Assertion,
        response: &CapturedResponse,
    ) -> AssertionResult {
        match assertion {
            Assertion::ResponseTimeBelow { max_ms } => {
                Self::check_response_time(assertion, response, *max_ms)
            }
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, *expected)
            }
            Assertion::Header { name, value } => {
                Self::check_header(assertion, response, name, value)
            }
            Assertion::MatchesSchema { variant } => {
                self.check_schema(assertion, response, *variant)
            }
            Assertion::JsonPath { path, expected } => {
                Self::check_json_path(assertion, response, path, expected)
            }
        }
    }

    fn check_response_time(
        assertion: &Assertion,
        response: &CapturedResponse,
        max_ms: u64,
    ) -> AssertionResult {
        let actual_ms = response.elapsed_ms();
        if response.duration < std::time::Duration::from_millis(max_ms) {
            AssertionResult::pass_with_value(assertion.clone(), format!("{actual_ms}ms"))
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                format!("{actual_ms}ms"),
                format!("Response took {actual_ms}ms, expected < {max_ms}ms"),
            )
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &CapturedResponse,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status;
        if actual == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!(
                    "Expected status {expected}, got {actual}; body: {}",
                    response.body_preview()
                ),
            )
        }
    }

    fn check_header(
        assertion: &Assertion,
        response: &CapturedResponse,
        name: &str,
        expected: &str,
    ) -> AssertionResult {
        match response.get_header(name) {
            Some(actual) if actual == expected => {
                AssertionResult::pass_with_value(assertion.clone(), actual)
            }
            Some(actual) => AssertionResult::fail_with_value(
                assertion.clone(),
                actual,
                format!("Header '{name}' value mismatch: expected '{expected}', got '{actual}'"),
            ),
            None => AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found")),
        }
    }

    fn check_schema(
        &self,
        assertion: &Assertion,
        response: &CapturedResponse,
        variant: SchemaVariant,
    ) -> AssertionResult {
        let Some(json) = &response.json else {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(),
                "Body is not valid JSON",
            );
        };

        let validator = match variant {
            SchemaVariant::Success => &self.success,
            SchemaVariant::Error => &self.error,
        };

        let errors: Vec<String> = validator.iter_errors(json).map(|e| e.to_string()).collect();
        if errors.is_empty() {
            AssertionResult::pass(assertion.clone())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(),
                format!("Schema violations: {}", errors.join("; ")),
            )
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &CapturedResponse,
        path: &str,
        expected: &Value,
    ) -> AssertionResult {
        let Some(json) = &response.json else {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(),
                "Failed to parse body as JSON",
            );
        };

        match query_json_path(json, path) {
            Ok(Some(value)) if value == expected => {
                AssertionResult::pass_with_value(assertion.clone(), value.to_string())
            }
            Ok(Some(value)) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' value mismatch: expected {expected}, got {value}"),
            ),
            Ok(None) => {
                AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
            }
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }
}

impl ResponseChecker for TestRunner {
    fn check(&self, assertion: &Assertion, response: &CapturedResponse) -> AssertionResult {
        self.run_assertion(assertion, response)
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0]
fn query_json_path<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let path = path.trim();
    let Some(path) = path.strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    let path = path.strip_prefix('.').unwrap_or(path);
    let mut current = json;

    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let (name, index) = parse_array_access(segment);
        if !name.is_empty() {
            match current.get(name) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
        if let Some(index) = index {
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            match current.get(idx) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current))
}

/// Parse array access like "field[0]" into ("field", Some("0")).
fn parse_array_access(segment: &str) -> (&str, Option<&str>) {
    if let Some(bracket_start) = segment.find('[')
        && segment.ends_with(']')
    {
        return (
            &segment[..bracket_start],
            Some(&segment[bracket_start + 1..segment.len() - 1]),
        );
    }
    (segment, None)
}
