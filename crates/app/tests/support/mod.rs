//! Shared fixtures for the app integration tests.

pub mod stub_service;
