//! Probe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus settings loading and logging.

pub mod adapters;
pub mod logging;
pub mod serialization;
pub mod settings;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use logging::init_tracing;
pub use serialization::{SerializationError, from_json_bytes, read_json_file};
pub use settings::{CONFIG_PATH_VAR, ConfigLoadError, ENV_PREFIX, load_schemas, load_settings};
pub use testing::{SchemaCompileError, TestRunner};
