//! Cache Module
//!
//! Provides the in-memory collection cache that sits in front of the
//! remote document store.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CollectionCache;
