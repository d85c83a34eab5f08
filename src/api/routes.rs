//! API Routes
//!
//! Configures the Axum router with all site endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    collection_handler, delete_message_handler, explore_handler, health_handler, home_handler,
    invalidate_handler, like_handler, messages_handler, save_message_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/collections/:name` - Any collection, with optional sort and cache bypass
/// - `GET /api/home` - Home page posts and stories
/// - `GET /api/explore` - Explore posts by display order
/// - `GET /api/messages` - Guestbook, oldest first
/// - `POST /api/messages` - Leave a guestbook message
/// - `DELETE /api/messages/:id` - Delete a message with its password
/// - `POST /like/:post_id` - Add or remove a like
/// - `DELETE /api/cache/:name` - Drop a cached collection snapshot
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/collections/:name", get(collection_handler))
        .route("/api/home", get(home_handler))
        .route("/api/explore", get(explore_handler))
        .route(
            "/api/messages",
            get(messages_handler).post(save_message_handler),
        )
        .route("/api/messages/:id", delete(delete_message_handler))
        .route("/like/:post_id", post(like_handler))
        .route("/api/cache/:name", delete(invalidate_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
