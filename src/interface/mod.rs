//! Interface layer - External interfaces
//!
//! This layer handles:
//! - REST API endpoints
//! - Request/response formatting
//! - Mapping domain errors to HTTP responses

pub mod api;
