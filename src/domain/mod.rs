//! Domain layer - Records, validation rules and the store port
//!
//! This layer contains:
//! - Models: call records, call events and the sample schemas
//! - Value Objects: identifiers and statuses
//! - Repository Interfaces: the document store port

pub mod call;
pub mod document;
pub mod product;
pub mod registry;
pub mod shared;
pub mod user;

// Re-export commonly used types
pub use shared::{DomainError, Result};
