//! Application error types

use thiserror::Error;

use crate::ports::HttpClientError;

/// Errors raised while driving a scenario.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScenarioError {
    /// Dispatch was requested before any request was built.
    #[error("no request has been prepared for this scenario")]
    NotPrepared,

    /// An assertion ran before the request was dispatched.
    #[error("no response has been captured for this scenario")]
    NotDispatched,

    /// The scenario already owns a request/response pair.
    #[error("the scenario already sent its request")]
    AlreadyDispatched,

    /// The scenario is not tagged for this endpoint, so it has no executor.
    #[error("scenario is not tagged @{tag}")]
    NoExecutor {
        /// The tag the scenario is missing.
        tag: String,
    },

    /// The HTTP round trip failed.
    #[error("{0}")]
    Http(#[from] HttpClientError),

    /// An expectation on the captured response was violated.
    #[error("{assertion} failed: {message}")]
    Expectation {
        /// Description of the violated assertion.
        assertion: String,
        /// Actual vs. expected details.
        message: String,
    },
}

/// Result type alias for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;
