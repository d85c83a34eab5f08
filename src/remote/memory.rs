//! In-process document store.
//!
//! Keeps collections in memory, ordered by document id. Supports seeding
//! from JSON and an availability switch to simulate outages.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, SiteError};
use crate::models::{Document, Fields};
use crate::remote::{RawDocument, RemoteStore};

type Collection = BTreeMap<String, Fields>;

// == Remote Calls ==
/// Number of calls received, by operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemoteCalls {
    pub list: u64,
    pub count: u64,
    pub get: u64,
    pub write: u64,
}

#[derive(Debug, Default)]
struct CallCounters {
    list: AtomicU64,
    count: AtomicU64,
    get: AtomicU64,
    write: AtomicU64,
}

// == Memory Store ==
#[derive(Debug)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    available: AtomicBool,
    calls: CallCounters,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
            calls: CallCounters::default(),
        }
    }

    /// Builds a store from seed documents keyed by collection name.
    pub fn with_documents(seed: HashMap<String, Vec<Document>>) -> Self {
        let collections = seed
            .into_iter()
            .map(|(name, docs)| {
                let docs = docs
                    .into_iter()
                    .map(|doc| (doc.id().to_string(), doc.fields().clone()))
                    .collect();
                (name, docs)
            })
            .collect();

        Self {
            collections: RwLock::new(collections),
            ..Self::new()
        }
    }

    /// Parses a seed document of the form `{"<collection>": [{"id": ..., ...}]}`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let seed: HashMap<String, Vec<Document>> = serde_json::from_str(json)?;
        Ok(Self::with_documents(seed))
    }

    /// Toggles simulated connectivity. While unavailable every call fails
    /// with `SiteError::Remote`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn calls(&self) -> RemoteCalls {
        RemoteCalls {
            list: self.calls.list.load(Ordering::SeqCst),
            count: self.calls.count.load(Ordering::SeqCst),
            get: self.calls.get.load(Ordering::SeqCst),
            write: self.calls.write.load(Ordering::SeqCst),
        }
    }

    /// Inserts a document directly, bypassing availability and counters.
    /// Stands in for edits made outside the site.
    pub async fn insert(&self, collection: &str, doc: Document) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(doc.id().to_string(), doc.fields().clone());
    }

    /// Current copy of a document, bypassing availability and counters.
    pub async fn peek(&self, collection: &str, id: &str) -> Option<Document> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone()))
    }

    fn check_available(&self, op: &str, collection: &str) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SiteError::Remote(format!(
                "{} on {} failed: store unavailable",
                op, collection
            )))
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<RawDocument>> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        self.check_available("list", collection)?;

        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| (id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count_documents(&self, collection: &str) -> Result<usize> {
        self.calls.count.fetch_add(1, Ordering::SeqCst);
        self.check_available("count", collection)?;

        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, BTreeMap::len))
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Fields> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.check_available("get", collection)?;

        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
            .ok_or_else(|| SiteError::NotFound(format!("{}/{}", collection, id)))
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.calls.write.fetch_add(1, Ordering::SeqCst);
        self.check_available("set", collection)?;

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn update_document(&self, collection: &str, id: &str, partial: Fields) -> Result<()> {
        self.calls.write.fetch_add(1, Ordering::SeqCst);
        self.check_available("update", collection)?;

        let mut collections = self.collections.write().await;
        let fields = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| SiteError::NotFound(format!("{}/{}", collection, id)))?;
        fields.extend(partial);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        self.calls.write.fetch_add(1, Ordering::SeqCst);
        self.check_available("delete", collection)?;

        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    fn new_document_id(&self, _collection: &str) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
