//! Cache-coordinated collection reads.
//!
//! Serves collections from the snapshot cache when it is both time-valid and
//! matches the remote document count, refreshes from the remote store
//! otherwise, and degrades to cached or empty data when the store fails.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::cache::{CacheStats, CollectionCache};
use crate::error::Result;
use crate::models::{sort_documents, Document};
use crate::remote::RemoteStore;

// == Read Options ==
/// Options for [`DataAccess::get_collection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field to sort by, if any
    pub sort_by: Option<String>,
    /// Sort direction (ignored without `sort_by`)
    pub ascending: bool,
    /// Bypass the cache entirely: always list remotely, never store the result
    pub ignore_cache: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            sort_by: None,
            ascending: true,
            ignore_cache: false,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    pub fn ignore_cache(mut self, ignore_cache: bool) -> Self {
        self.ignore_cache = ignore_cache;
        self
    }

    fn apply_sort(&self, docs: &mut [Document]) {
        if let Some(field) = &self.sort_by {
            sort_documents(docs, field, self.ascending);
        }
    }
}

// == Data Access ==
/// Data-access component owning the remote store handle and the shared
/// collection cache.
#[derive(Clone)]
pub struct DataAccess {
    store: Arc<dyn RemoteStore>,
    cache: Arc<RwLock<CollectionCache>>,
}

impl DataAccess {
    // == Constructor ==
    pub fn new(store: Arc<dyn RemoteStore>, cache: CollectionCache) -> Self {
        Self {
            store,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<RwLock<CollectionCache>> {
        &self.cache
    }

    // == Get Collection ==
    /// Returns the documents of collection `name`.
    ///
    /// Never fails: on a remote failure the previous snapshot is returned if
    /// it is still time-valid, otherwise an empty list.
    pub async fn get_collection(&self, name: &str, options: &ReadOptions) -> Vec<Document> {
        match self.read_collection(name, options).await {
            Ok(docs) => docs,
            Err(e) => {
                error!("Error reading collection {}: {}", name, e);

                let mut cache = self.cache.write().await;
                let fallback = if cache.is_valid(name) {
                    cache.get(name).cloned()
                } else {
                    None
                };

                match fallback {
                    Some(docs) => {
                        warn!("Returning cached {} ({} documents) after remote failure", name, docs.len());
                        cache.stats_mut().record_fallback();
                        docs
                    }
                    None => {
                        cache.stats_mut().record_empty_fallback();
                        Vec::new()
                    }
                }
            }
        }
    }

    async fn read_collection(&self, name: &str, options: &ReadOptions) -> Result<Vec<Document>> {
        if !options.ignore_cache {
            if let Some(hit) = self.try_cache_hit(name, options).await {
                return Ok(hit);
            }
        }

        let mut docs: Vec<Document> = self
            .store
            .list_documents(name)
            .await?
            .into_iter()
            .map(|(id, fields)| Document::new(id, fields))
            .collect();
        options.apply_sort(&mut docs);

        let mut cache = self.cache.write().await;
        cache.stats_mut().record_miss();
        if !options.ignore_cache {
            cache.set(name, docs.clone());
            info!("Cached {} documents for {}", docs.len(), name);
        }

        Ok(docs)
    }

    /// Returns the cached snapshot if it is time-valid and its length matches
    /// the remote count. A failed count distrusts the cache.
    async fn try_cache_hit(&self, name: &str, options: &ReadOptions) -> Option<Vec<Document>> {
        let cached_len = {
            let cache = self.cache.read().await;
            if !cache.is_valid(name) {
                return None;
            }
            cache.get(name).map(Vec::len)?
        };

        let current = match self.store.count_documents(name).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Could not count {}, distrusting cache: {}", name, e);
                return None;
            }
        };

        if current != cached_len {
            info!(
                "Cache invalidated for {} - count mismatch (cache: {}, current: {})",
                name, cached_len, current
            );
            return None;
        }

        let mut cache = self.cache.write().await;
        // Snapshot may have been replaced while counting
        let docs = cache.get_mut(name).filter(|docs| docs.len() == current)?;
        options.apply_sort(docs);
        let docs = docs.clone();
        cache.stats_mut().record_hit();
        info!("Cache hit for {} - count match ({})", name, current);

        Some(docs)
    }

    // == Invalidate ==
    /// Drops the cached snapshot for `name`; the next read refreshes it.
    pub async fn invalidate(&self, name: &str) {
        self.cache.write().await.invalidate(name);
        info!("Cache invalidated for {} on request", name);
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}
