//! Probe Application - Use cases and ports
//!
//! This crate contains the scenario executor and the port definitions it
//! depends on. It knows nothing about reqwest or JSON Schema engines.

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ScenarioError, ScenarioResult};
pub use use_cases::ScenarioExecutor;
