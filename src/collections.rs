//! Known collection names and well-known document fields.

/// Wedding posts shown on the home and explore pages.
pub const POSTS: &str = "wedding_post";

/// Stories shown in the home page carousel.
pub const STORIES: &str = "wedding_story";

/// Guestbook messages.
pub const GUESTBOOK: &str = "wedding_guestbook";

/// Every collection that gets a cache entry at startup.
pub const KNOWN: [&str; 3] = [POSTS, STORIES, GUESTBOOK];

// == Field Names ==
pub const FIELD_LIKE: &str = "like";
pub const FIELD_ORDER: &str = "order";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_EXPLORE: &str = "explore";
pub const FIELD_PASSWORD: &str = "password";

/// Returns true if `name` is one of the cached collections.
pub fn is_known(name: &str) -> bool {
    KNOWN.contains(&name)
}
