//! Request DTOs for the site API
//!
//! Defines the structure of incoming query strings and HTTP request bodies.

use serde::Deserialize;

use crate::data::{NewMessage, ReadOptions};

/// Query string for GET /api/collections/:name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionQuery {
    /// Field to sort by
    #[serde(default)]
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    #[serde(default)]
    pub order: Option<String>,
    /// Bypass the cache
    #[serde(default)]
    pub fresh: bool,
}

impl CollectionQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.order.as_deref() {
            None | Some("asc") | Some("desc") => None,
            Some(other) => Some(format!("Unknown order '{}', expected asc or desc", other)),
        }
    }

    pub fn read_options(&self) -> ReadOptions {
        let mut options = ReadOptions::new()
            .ascending(self.order.as_deref() != Some("desc"))
            .ignore_cache(self.fresh);
        if let Some(field) = self.sort_by.as_deref().filter(|f| !f.is_empty()) {
            options = options.sort_by(field);
        }
        options
    }
}

/// Request body for POST /like/:post_id
///
/// `"add"` adds a like; any other action removes one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LikeRequest {
    #[serde(default)]
    pub action: Option<String>,
}

impl LikeRequest {
    pub fn is_adding(&self) -> bool {
        self.action.as_deref() == Some("add")
    }
}

/// Request body for POST /api/messages
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessageRequest {
    pub name: String,
    pub comment: String,
    pub password: String,
    /// File name of an already uploaded profile image
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl NewMessageRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.comment.trim().is_empty() {
            return Some("Comment cannot be empty".to_string());
        }
        if self.password.is_empty() {
            return Some("Password cannot be empty".to_string());
        }
        None
    }
}

impl From<NewMessageRequest> for NewMessage {
    fn from(req: NewMessageRequest) -> Self {
        NewMessage {
            name: req.name,
            comment: req.comment,
            password: req.password,
            profile_image: req.profile_image,
        }
    }
}

/// Request body for DELETE /api/messages/:id
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteMessageRequest {
    pub password: String,
}
