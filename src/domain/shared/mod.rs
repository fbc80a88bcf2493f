//! Shared kernel - Common types used by every model and the store port

pub mod error;
pub mod value_objects;

pub use error::{DomainError, Result};
pub use value_objects::*;
