//! OIDC Probe - Behavioural checks for `POST /client-mgmt/oidc-client`
//!
//! Wires the scenario executor to the reqwest adapter and the schema-aware
//! test runner, and exposes the cucumber world that drives the feature files.

pub mod client_create;

pub use client_create::{
    ClientCreateExecutor, ClientCreateWorld, ScenarioContext, SetupError, run_features,
};
