//! Cache Entry Module
//!
//! Defines the per-collection snapshot held by the collection cache.

use chrono::{DateTime, Duration, Utc};

use crate::models::Document;

// == Cache Entry ==
/// Snapshot of one collection plus the moment it was captured.
///
/// Both fields are either present or absent together.
#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    data: Option<Vec<Document>>,
    captured_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an empty (uninitialized) entry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an entry holding `data`, stamped at `captured_at`.
    pub fn captured(data: Vec<Document>, captured_at: DateTime<Utc>) -> Self {
        Self {
            data: Some(data),
            captured_at: Some(captured_at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    pub fn data(&self) -> Option<&Vec<Document>> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut Vec<Document>> {
        self.data.as_mut()
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at
    }

    // == Is Fresh ==
    /// Returns true if the entry holds data captured no more than
    /// `expiration` before `now`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, expiration: Duration) -> bool {
        match (&self.data, self.captured_at) {
            (Some(_), Some(captured_at)) => now - captured_at <= expiration,
            _ => false,
        }
    }

    // == Age ==
    /// Age of the snapshot at `now`, or None for an empty entry.
    pub fn age_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.captured_at.map(|captured_at| now - captured_at)
    }

    /// Resets both fields to absent.
    pub fn clear(&mut self) {
        self.data = None;
        self.captured_at = None;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fields;

    fn docs(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| Document::new(format!("doc{}", i), Fields::new()))
            .collect()
    }

    #[test]
    fn test_entry_empty() {
        let entry = CacheEntry::empty();
        assert!(entry.is_empty());
        assert!(entry.data().is_none());
        assert!(entry.captured_at().is_none());
        assert!(!entry.is_fresh_at(Utc::now(), Duration::seconds(300)));
    }

    #[test]
    fn test_entry_fresh_within_expiration() {
        let now = Utc::now();
        let entry = CacheEntry::captured(docs(2), now);

        assert!(entry.is_fresh_at(now, Duration::seconds(300)));
        assert!(entry.is_fresh_at(now + Duration::seconds(300), Duration::seconds(300)));
    }

    #[test]
    fn test_entry_stale_after_expiration() {
        let now = Utc::now();
        let entry = CacheEntry::captured(docs(2), now);

        assert!(!entry.is_fresh_at(now + Duration::seconds(301), Duration::seconds(300)));
        // Whole days count too
        assert!(!entry.is_fresh_at(now + Duration::days(1), Duration::seconds(300)));
    }

    #[test]
    fn test_entry_empty_data_is_still_fresh() {
        let now = Utc::now();
        let entry = CacheEntry::captured(Vec::new(), now);
        assert!(!entry.is_empty());
        assert!(entry.is_fresh_at(now, Duration::seconds(10)));
    }

    #[test]
    fn test_entry_clear() {
        let now = Utc::now();
        let mut entry = CacheEntry::captured(docs(1), now);

        entry.clear();
        assert!(entry.is_empty());
        assert!(entry.captured_at().is_none());
        assert!(entry.age_at(now).is_none());
    }

    #[test]
    fn test_entry_age() {
        let now = Utc::now();
        let entry = CacheEntry::captured(docs(1), now);
        assert_eq!(entry.age_at(now + Duration::seconds(42)), Some(Duration::seconds(42)));
    }
}
