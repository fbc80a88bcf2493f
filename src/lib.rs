//! NEOSERVICE - Voice-call record keeping backend
//!
//! A layered (domain / application / infrastructure / interface) service
//! that stores call records and their events in a document store and
//! exposes them over a small REST API.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::error::Result;
