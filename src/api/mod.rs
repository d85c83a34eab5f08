//! API Module
//!
//! HTTP handlers and routing for the site's JSON API.
//!
//! # Endpoints
//! - `GET /api/collections/:name` - Read a collection
//! - `GET /api/home`, `GET /api/explore`, `GET /api/messages` - Page data
//! - `POST /api/messages`, `DELETE /api/messages/:id` - Guestbook
//! - `POST /like/:post_id` - Likes
//! - `DELETE /api/cache/:name` - Cache invalidation
//! - `GET /stats`, `GET /health` - Operations

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
