//! Product schema

use crate::domain::document::Document;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::error::Result;
use serde::{Deserialize, Serialize};

/// Product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in dollars
    pub price: f64,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Document for Product {
    const MODEL: &'static str = "Product";
    const COLLECTION: &'static str = "product";
}

impl Product {
    pub fn validate(&self) -> Result<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::ValidationError(format!(
                "price must be greater than or equal to 0, got {}",
                self.price
            )));
        }
        Ok(())
    }
}
