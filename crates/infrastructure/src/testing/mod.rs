//! Response testing infrastructure.
//!
//! This module provides the test runner that executes assertions against HTTP responses.

mod runner;

pub use runner::{SchemaCompileError, TestRunner};
