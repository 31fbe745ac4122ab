//! Shared wire types for the Langlens detection API.
//!
//! Everything the HTTP layer sends or receives lives here so that clients
//! and the server agree on one definition.

pub mod api;

pub use api::{CONFIDENCE_TAG, CodeSnippet, Prediction, ServiceInfo};
