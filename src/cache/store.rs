//! Collection Cache Module
//!
//! Per-collection document snapshots with a time-boxed validity window.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};
use crate::collections;
use crate::models::{Document, FieldValue};

// == Collection Cache ==
/// Snapshot cache for the known collections.
///
/// Entries exist only for [`collections::KNOWN`]; every operation on any
/// other name behaves as a permanent miss.
#[derive(Debug)]
pub struct CollectionCache {
    /// One entry per known collection
    entries: HashMap<String, CacheEntry>,
    /// How long a snapshot stays valid after capture
    expiration: Duration,
    /// Read-path statistics
    stats: CacheStats,
}

impl CollectionCache {
    // == Constructor ==
    /// Creates a cache with an empty entry for every known collection.
    ///
    /// # Arguments
    /// * `expiration_secs` - Seconds a snapshot stays valid after capture
    pub fn new(expiration_secs: u64) -> Self {
        let entries = collections::KNOWN
            .iter()
            .map(|name| (name.to_string(), CacheEntry::empty()))
            .collect();
        // TimeDelta tops out at i64::MAX milliseconds
        let secs = i64::try_from(expiration_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);

        Self {
            entries,
            expiration: Duration::seconds(secs),
            stats: CacheStats::new(),
        }
    }

    /// How long a snapshot stays valid after capture.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    // == Is Valid ==
    /// Returns true if `name` holds a snapshot younger than the expiration.
    pub fn is_valid(&self, name: &str) -> bool {
        self.is_valid_at(name, Utc::now())
    }

    /// [`is_valid`](Self::is_valid) evaluated at an explicit instant.
    pub fn is_valid_at(&self, name: &str, now: DateTime<Utc>) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| entry.is_fresh_at(now, self.expiration))
    }

    // == Get ==
    /// Returns the stored snapshot for `name` without checking validity.
    pub fn get(&self, name: &str) -> Option<&Vec<Document>> {
        self.entries.get(name).and_then(CacheEntry::data)
    }

    /// Mutable access to the stored snapshot, used to sort it in place.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Vec<Document>> {
        self.entries.get_mut(name).and_then(CacheEntry::data_mut)
    }

    pub fn entry(&self, name: &str) -> Option<&CacheEntry> {
        self.entries.get(name)
    }

    // == Set ==
    /// Replaces the snapshot for `name` and stamps it with the current time.
    pub fn set(&mut self, name: &str, data: Vec<Document>) {
        self.set_at(name, data, Utc::now());
    }

    /// [`set`](Self::set) with an explicit capture time.
    pub fn set_at(&mut self, name: &str, data: Vec<Document>, captured_at: DateTime<Utc>) {
        match self.entries.get_mut(name) {
            Some(entry) => *entry = CacheEntry::captured(data, captured_at),
            None => debug!("Ignoring cache set for unknown collection {}", name),
        }
    }

    // == Invalidate ==
    /// Clears the snapshot for `name`. Idempotent.
    pub fn invalidate(&mut self, name: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.clear();
        }
    }

    // == Patch Field ==
    /// Overwrites one field of one cached document in place.
    ///
    /// Leaves the capture time untouched. Returns false, without error, when
    /// the collection has no snapshot or the document is not in it.
    pub fn patch_field(
        &mut self,
        name: &str,
        document_id: &str,
        field: &str,
        value: FieldValue,
    ) -> bool {
        let Some(doc) = self
            .get_mut(name)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id() == document_id))
        else {
            return false;
        };

        doc.set(field, value);
        self.stats.record_patch();
        true
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Snapshot Ages ==
    /// Whole seconds since each known collection was captured, as of `now`.
    /// Empty entries map to None.
    pub fn snapshot_ages_at(&self, now: DateTime<Utc>) -> BTreeMap<String, Option<i64>> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.age_at(now).map(|age| age.num_seconds())))
            .collect()
    }

    pub(crate) fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{GUESTBOOK, POSTS, STORIES};
    use crate::models::Fields;

    fn posts(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| Document::new(format!("post{}", i), Fields::new()).with("like", 0))
            .collect()
    }

    #[test]
    fn test_cache_new_has_empty_known_entries() {
        let cache = CollectionCache::new(300);

        for name in [POSTS, STORIES, GUESTBOOK] {
            assert!(cache.entry(name).is_some_and(CacheEntry::is_empty));
            assert!(!cache.is_valid(name));
            assert!(cache.get(name).is_none());
        }
    }

    #[test]
    fn test_cache_set_and_get() {
        let mut cache = CollectionCache::new(300);

        cache.set(POSTS, posts(3));

        assert!(cache.is_valid(POSTS));
        assert_eq!(cache.get(POSTS).map(Vec::len), Some(3));
    }

    #[test]
    fn test_cache_set_replaces_wholesale() {
        let mut cache = CollectionCache::new(300);

        cache.set(POSTS, posts(3));
        cache.set(POSTS, posts(1));

        assert_eq!(cache.get(POSTS).map(Vec::len), Some(1));
    }

    #[test]
    fn test_cache_unknown_collection() {
        let mut cache = CollectionCache::new(300);

        cache.set("wedding_twocut", posts(2));

        assert!(!cache.is_valid("wedding_twocut"));
        assert!(cache.get("wedding_twocut").is_none());
        assert!(!cache.patch_field("wedding_twocut", "post0", "like", 1.into()));
    }

    #[test]
    fn test_cache_expiration() {
        let mut cache = CollectionCache::new(300);
        let captured = Utc::now();

        cache.set_at(POSTS, posts(1), captured);

        assert!(cache.is_valid_at(POSTS, captured + Duration::seconds(299)));
        assert!(cache.is_valid_at(POSTS, captured + Duration::seconds(300)));
        assert!(!cache.is_valid_at(POSTS, captured + Duration::seconds(301)));
        // Stale data is still returned by get
        assert_eq!(cache.get(POSTS).map(Vec::len), Some(1));
    }

    #[test]
    fn test_cache_snapshot_ages() {
        let mut cache = CollectionCache::new(300);
        let captured = Utc::now();

        cache.set_at(POSTS, posts(1), captured);
        let ages = cache.snapshot_ages_at(captured + Duration::seconds(42));

        assert_eq!(ages.len(), 3);
        assert_eq!(ages.get(POSTS), Some(&Some(42)));
        assert_eq!(ages.get(STORIES), Some(&None));
        assert_eq!(cache.expiration(), Duration::seconds(300));
    }

    #[test]
    fn test_cache_zero_expiration() {
        let mut cache = CollectionCache::new(0);
        let captured = Utc::now();

        cache.set_at(STORIES, posts(1), captured);

        assert!(cache.is_valid_at(STORIES, captured));
        assert!(!cache.is_valid_at(STORIES, captured + Duration::seconds(1)));
    }

    #[test]
    fn test_cache_invalidate_twice() {
        let mut cache = CollectionCache::new(300);

        cache.set(GUESTBOOK, posts(2));
        cache.invalidate(GUESTBOOK);
        cache.invalidate(GUESTBOOK);

        let entry = cache.entry(GUESTBOOK).unwrap();
        assert!(entry.data().is_none());
        assert!(entry.captured_at().is_none());
        assert!(!cache.is_valid(GUESTBOOK));
    }

    #[test]
    fn test_cache_patch_field() {
        let mut cache = CollectionCache::new(300);
        let captured = Utc::now();
        cache.set_at(POSTS, posts(3), captured);

        assert!(cache.patch_field(POSTS, "post1", "like", 6.into()));

        let docs = cache.get(POSTS).unwrap();
        assert_eq!(docs[1].get("like"), Some(&FieldValue::Integer(6)));
        assert_eq!(docs[0].get("like"), Some(&FieldValue::Integer(0)));
        assert_eq!(cache.entry(POSTS).unwrap().captured_at(), Some(captured));
        assert_eq!(cache.stats().patches, 1);
    }

    #[test]
    fn test_cache_patch_missing_document_is_noop() {
        let mut cache = CollectionCache::new(300);
        cache.set(POSTS, posts(2));
        let before = cache.get(POSTS).cloned();

        assert!(!cache.patch_field(POSTS, "post99", "like", 6.into()));

        assert_eq!(cache.get(POSTS).cloned(), before);
        assert_eq!(cache.stats().patches, 0);
    }

    #[test]
    fn test_cache_patch_empty_entry_is_noop() {
        let mut cache = CollectionCache::new(300);

        assert!(!cache.patch_field(POSTS, "post0", "like", 6.into()));
        assert!(cache.get(POSTS).is_none());
    }
}
