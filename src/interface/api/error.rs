//! HTTP error responses

use crate::domain::shared::error::DomainError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error body: `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// A domain error on its way out of a handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // Malformed ids are reported like any other store failure
            DomainError::InvalidIdentifier(_)
            | DomainError::StoreUnavailable(_)
            | DomainError::Store(_)
            | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::ValidationError(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(DomainError::ValidationError(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("API: {}", self.0);
        }

        let body = ErrorResponse {
            detail: self.0.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
