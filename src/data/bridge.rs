//! Cache patching after successful remote mutations.
//!
//! Callers mutate the remote store first and call in here only once that
//! write has succeeded. Nothing in this module talks to the remote store.

use tracing::debug;

use crate::cache::CollectionCache;
use crate::collections::FIELD_LIKE;

// == Apply Like Delta ==
/// Writes a committed like count into the cached copy of a document.
///
/// Returns whether a cached document was patched; a collection without a
/// snapshot or a document outside it is left alone.
pub fn apply_like_delta(
    cache: &mut CollectionCache,
    collection: &str,
    document_id: &str,
    new_like_count: i64,
) -> bool {
    let patched = cache.patch_field(collection, document_id, FIELD_LIKE, new_like_count.into());
    if !patched {
        debug!("No cached copy of {}/{} to patch", collection, document_id);
    }
    patched
}
