//! User schema

use crate::domain::document::Document;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::error::Result;
use serde::{Deserialize, Serialize};

/// Oldest accepted age, in years
pub const MAX_AGE: u8 = 120;

/// User record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Full name
    pub name: String,
    pub email: String,
    pub address: String,
    /// Age in years
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Document for User {
    const MODEL: &'static str = "User";
    const COLLECTION: &'static str = "user";
}

impl User {
    pub fn new(name: String, email: String, address: String) -> Self {
        Self {
            name,
            email,
            address,
            age: None,
            is_active: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(age) = self.age {
            if age > MAX_AGE {
                return Err(DomainError::ValidationError(format!(
                    "age must be between 0 and {}, got {}",
                    MAX_AGE, age
                )));
            }
        }
        Ok(())
    }
}
