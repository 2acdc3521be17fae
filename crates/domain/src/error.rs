//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building requests or schemas.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured base host or endpoint does not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A field name does not belong to the client-create request.
    #[error("unknown client field: {0}")]
    UnknownField(String),

    /// A response schema document cannot be turned into its variants.
    #[error("invalid response schema: {0}")]
    InvalidSchema(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
