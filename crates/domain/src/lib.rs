//! Probe Domain - Core types
//!
//! This crate defines the domain model for the OIDC client-create probe.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod schema;
pub mod settings;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use request::{ClientCreateRequest, ClientDetails, ClientField, ClientValues, PreparedRequest};
pub use response::CapturedResponse;
pub use schema::{ResponseSchemas, SchemaVariant, default_envelope_schema};
pub use settings::{
    CLIENT_CREATE_ENDPOINT, DEFAULT_BASE_HOST, DEFAULT_RESPONSE_TIME_MS, HarnessSettings,
    HeaderExpectation,
};
pub use testing::{Assertion, AssertionResult};
