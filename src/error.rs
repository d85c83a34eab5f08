//! Error types for the wedding site
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Site Error Enum ==
/// Unified error type for the data layer and its HTTP surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteError {
    /// Referenced document does not exist
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Remote store unreachable or the operation was rejected
    #[error("Remote store error: {0}")]
    Remote(String),

    /// Credential mismatch on a guarded mutation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = match &self {
            SiteError::NotFound(_) => StatusCode::NOT_FOUND,
            SiteError::Remote(_) => StatusCode::BAD_GATEWAY,
            SiteError::Forbidden(_) => StatusCode::FORBIDDEN,
            SiteError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the wedding site.
pub type Result<T> = std::result::Result<T, SiteError>;
