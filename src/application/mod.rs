//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases.
//! It's responsible for:
//! - Validating use-case input
//! - Converting between domain models and stored documents
//! - Driving the document store

pub mod call_service;

pub use call_service::{CallService, EndedCall, StartedCall};
