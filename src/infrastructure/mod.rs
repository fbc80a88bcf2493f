//! Infrastructure layer - Technical implementations
//!
//! This layer contains the document store adapters (PostgreSQL, in-memory).

pub mod persistence;
