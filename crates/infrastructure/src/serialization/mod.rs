//! JSON helpers for fixture and schema files.

mod json;

pub use json::*;
