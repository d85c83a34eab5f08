//! Data Access Module
//!
//! Cache-coordinated reads and the mutations that keep the cache in step
//! with the remote store.

mod bridge;
mod guestbook;
mod posts;
mod reader;

pub use bridge::apply_like_delta;
pub use guestbook::{NewMessage, DEFAULT_PROFILE_IMAGE};
pub use reader::{DataAccess, ReadOptions};
