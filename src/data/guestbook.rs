//! Guestbook messages.
//!
//! Writes go straight to the remote store and never touch the cache; the
//! next read sees the changed document count and refreshes.

use chrono::Utc;
use tracing::info;

use crate::collections::{FIELD_PASSWORD, FIELD_TIMESTAMP, GUESTBOOK};
use crate::data::DataAccess;
use crate::error::{Result, SiteError};
use crate::models::{Document, FieldValue, Fields};

/// Profile image used when a guest uploads none.
pub const DEFAULT_PROFILE_IMAGE: &str = "default.jpg";

// == New Message ==
/// A guestbook message as submitted by a guest.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub name: String,
    pub comment: String,
    /// Needed later to delete the message
    pub password: String,
    pub profile_image: Option<String>,
}

impl DataAccess {
    // == Save Message ==
    /// Stores a new guestbook message and returns it without its
    /// timestamp or password.
    pub async fn save_message(&self, message: NewMessage) -> Result<Document> {
        let id = self.store().new_document_id(GUESTBOOK);
        let profile_image = message
            .profile_image
            .filter(|image| !image.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string());

        let mut fields = Fields::new();
        fields.insert("profile_image".to_string(), profile_image.into());
        fields.insert("name".to_string(), message.name.into());
        fields.insert("comment".to_string(), message.comment.into());
        fields.insert(FIELD_PASSWORD.to_string(), message.password.into());
        fields.insert(FIELD_TIMESTAMP.to_string(), Utc::now().into());

        self.store().set_document(GUESTBOOK, &id, fields.clone()).await?;

        let mut saved = Document::new(id, fields);
        saved.remove(FIELD_TIMESTAMP);
        saved.remove(FIELD_PASSWORD);
        info!(
            "Saved guestbook message {} from {:?}",
            saved.id(),
            saved.get("name").and_then(FieldValue::as_str).unwrap_or_default()
        );

        Ok(saved)
    }

    // == Delete Message ==
    /// Deletes a guestbook message if `password` matches the one it was
    /// saved with.
    pub async fn delete_message(&self, message_id: &str, password: &str) -> Result<()> {
        let fields = self.store().get_document(GUESTBOOK, message_id).await?;

        let stored = fields.get(FIELD_PASSWORD).and_then(FieldValue::as_str);
        if stored != Some(password) {
            return Err(SiteError::Forbidden(
                "Password does not match".to_string(),
            ));
        }

        self.store().delete_document(GUESTBOOK, message_id).await?;
        info!("Deleted guestbook message {}", message_id);

        Ok(())
    }
}
