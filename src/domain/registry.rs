//! Declared models
//!
//! Every record type and its collection, enumerated once. The schema viewer
//! reads the model names from here.

use crate::domain::call::{Call, CallEvent};
use crate::domain::document::Document;
use crate::domain::product::Product;
use crate::domain::user::User;
use serde::Serialize;

/// One declared model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub name: &'static str,
    /// `None` for models embedded inside another document
    pub collection: Option<&'static str>,
}

impl ModelDescriptor {
    fn of<D: Document>() -> Self {
        Self {
            name: D::MODEL,
            collection: Some(D::COLLECTION),
        }
    }
}

/// All declared models, in declaration order
pub fn declared_models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::of::<User>(),
        ModelDescriptor::of::<Product>(),
        ModelDescriptor::of::<Call>(),
        ModelDescriptor {
            name: CallEvent::MODEL,
            collection: None,
        },
    ]
}

pub fn model_names() -> Vec<&'static str> {
    declared_models().into_iter().map(|m| m.name).collect()
}
