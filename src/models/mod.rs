//! Document model plus request and response models for the site API
//!
//! The document types are shared by every layer; the DTOs only by the
//! HTTP handlers.

pub mod document;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use document::{sort_documents, Document, FieldValue, Fields};
pub use requests::{CollectionQuery, DeleteMessageRequest, LikeRequest, NewMessageRequest};
pub use responses::{
    CollectionResponse, ErrorResponse, HealthResponse, HomeResponse, InvalidateResponse,
    LikeResponse, MessageResponse, StatsResponse, SuccessResponse,
};
