//! Response DTOs for the site API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::Document;

/// Response body for GET /api/collections/:name, /api/explore and /api/messages
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    pub collection: String,
    pub count: usize,
    pub documents: Vec<Document>,
}

impl CollectionResponse {
    pub fn new(collection: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            collection: collection.into(),
            count: documents.len(),
            documents,
        }
    }
}

/// Response body for GET /api/home
#[derive(Debug, Clone, Serialize)]
pub struct HomeResponse {
    /// Posts not marked for the explore page
    pub posts: Vec<Document>,
    pub stories: Vec<Document>,
}

/// Response body for POST /like/:post_id
#[derive(Debug, Clone, Serialize)]
pub struct LikeResponse {
    pub success: bool,
    pub likes: i64,
}

impl LikeResponse {
    pub fn new(likes: i64) -> Self {
        Self {
            success: true,
            likes,
        }
    }
}

/// Response body for POST /api/messages
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: Document,
}

impl MessageResponse {
    pub fn new(message: Document) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Bare success acknowledgement (DELETE /api/messages/:id)
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response body for DELETE /api/cache/:name
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// The collection whose snapshot was dropped
    pub collection: String,
}

impl InvalidateResponse {
    pub fn new(collection: impl Into<String>) -> Self {
        let collection = collection.into();
        Self {
            message: format!("Cache for '{}' invalidated", collection),
            collection,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that listed the remote collection
    pub misses: u64,
    /// Reads served stale after a remote failure
    pub fallbacks: u64,
    /// Reads that came back empty after a remote failure
    pub empty_fallbacks: u64,
    /// Point-patches applied to cached documents
    pub patches: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Configured snapshot lifetime
    pub expiration_secs: i64,
    /// Seconds since each collection was captured (null when not cached)
    pub snapshot_ages: BTreeMap<String, Option<i64>>,
}

impl StatsResponse {
    pub fn new(
        stats: CacheStats,
        expiration: Duration,
        snapshot_ages: BTreeMap<String, Option<i64>>,
    ) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            fallbacks: stats.fallbacks,
            empty_fallbacks: stats.empty_fallbacks,
            patches: stats.patches,
            expiration_secs: expiration.num_seconds(),
            snapshot_ages,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fields;

    #[test]
    fn test_collection_response_counts() {
        let docs = vec![
            Document::new("a", Fields::new()),
            Document::new("b", Fields::new()),
        ];
        let response = CollectionResponse::new("wedding_post", docs);
        assert_eq!(response.count, 2);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["documents"][1]["id"], "b");
    }

    #[test]
    fn test_like_response_serialize() {
        let json = serde_json::to_string(&LikeResponse::new(6)).unwrap();
        assert_eq!(json, r#"{"success":true,"likes":6}"#);
    }

    #[test]
    fn test_invalidate_response() {
        let response = InvalidateResponse::new("wedding_story");
        assert!(response.message.contains("wedding_story"));
    }

    #[test]
    fn test_stats_response_new() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_patch();

        let ages = BTreeMap::from([("wedding_post".to_string(), Some(7))]);

        let response = StatsResponse::new(stats, Duration::seconds(300), ages);
        assert_eq!(response.hit_rate, 0.5);
        assert_eq!(response.patches, 1);
        assert_eq!(response.expiration_secs, 300);
        assert_eq!(response.snapshot_ages.get("wedding_post"), Some(&Some(7)));
    }

    #[test]
    fn test_health_response() {
        let response = HealthResponse::healthy();
        assert_eq!(response.status, "healthy");
        assert!(!response.timestamp.is_empty());
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Not found")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"Not found"}"#);
    }
}
