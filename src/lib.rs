//! Wedding Site - data layer for a small wedding website
//!
//! Serves posts, stories and guestbook messages from a remote document store
//! through a read-through collection cache.

pub mod api;
pub mod cache;
pub mod collections;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod remote;

pub use api::AppState;
pub use config::Config;
pub use data::{DataAccess, ReadOptions};
pub use error::{Result, SiteError};
