//! Post like-count mutation.

use tracing::info;

use crate::collections::{FIELD_LIKE, POSTS};
use crate::data::{apply_like_delta, DataAccess};
use crate::error::Result;
use crate::models::{FieldValue, Fields};

impl DataAccess {
    // == Update Like ==
    /// Adds or removes one like on a post and returns the new count.
    ///
    /// The count never drops below zero. The remote document is updated
    /// first; the cached copy is patched only after that write succeeds, so
    /// a failed write leaves the cache untouched. No retries.
    pub async fn update_like_and_cache(&self, post_id: &str, is_adding: bool) -> Result<i64> {
        let fields = self.store().get_document(POSTS, post_id).await?;

        let current = fields
            .get(FIELD_LIKE)
            .and_then(FieldValue::as_i64)
            .unwrap_or(0);
        let delta = if is_adding { 1 } else { -1 };
        let new_count = current.saturating_add(delta).max(0);

        let mut partial = Fields::new();
        partial.insert(FIELD_LIKE.to_string(), new_count.into());
        self.store().update_document(POSTS, post_id, partial).await?;
        info!("Updated like count for post {}: {}", post_id, new_count);

        let mut cache = self.cache().write().await;
        apply_like_delta(&mut cache, POSTS, post_id, new_count);

        Ok(new_count)
    }
}
