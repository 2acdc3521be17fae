//! HTTP Response domain types

mod captured;

pub use captured::CapturedResponse;
