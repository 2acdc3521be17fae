//! Response checker port

use probe_domain::{Assertion, AssertionResult, CapturedResponse};

/// Port for evaluating an assertion against a captured response.
pub trait ResponseChecker: Send + Sync {
    /// Runs a single assertion. Failures are reported in the result, not as
    /// errors.
    fn check(&self, assertion: &Assertion, response: &CapturedResponse) -> AssertionResult;
}
