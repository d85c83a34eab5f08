//! Remote Store Module
//!
//! The document database seen through a narrow async interface, plus an
//! in-process implementation for local runs and tests.

mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Fields;

pub use memory::{MemoryStore, RemoteCalls};

/// A document as listed by the store: its id and its field map.
pub type RawDocument = (String, Fields);

// == Remote Store ==
/// Operations the data layer needs from the document database.
///
/// Connectivity or permission failures surface as `SiteError::Remote`;
/// a missing document on single-document operations as `SiteError::NotFound`.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Lists every document of a collection.
    async fn list_documents(&self, collection: &str) -> Result<Vec<RawDocument>>;

    /// Counts the documents of a collection without fetching them.
    async fn count_documents(&self, collection: &str) -> Result<usize>;

    /// Fetches a single document.
    async fn get_document(&self, collection: &str, id: &str) -> Result<Fields>;

    /// Creates or replaces a document.
    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Merges `partial` into an existing document.
    async fn update_document(&self, collection: &str, id: &str, partial: Fields) -> Result<()>;

    /// Deletes a document.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<()>;

    /// Allocates a fresh document id for `collection`.
    fn new_document_id(&self, collection: &str) -> String;
}
