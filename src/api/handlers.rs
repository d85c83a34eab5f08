//! API Handlers
//!
//! HTTP request handlers for each site endpoint. Business rules live in
//! [`crate::data`]; handlers only translate HTTP to data-layer calls.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::cache::CollectionCache;
use crate::collections::{self, FIELD_EXPLORE, FIELD_ORDER, FIELD_PASSWORD, FIELD_TIMESTAMP};
use crate::data::{DataAccess, ReadOptions};
use crate::error::{Result, SiteError};
use crate::models::{
    sort_documents, CollectionQuery, CollectionResponse, DeleteMessageRequest, Document,
    HealthResponse, HomeResponse, InvalidateResponse, LikeRequest, LikeResponse, MessageResponse,
    NewMessageRequest, StatsResponse, SuccessResponse,
};
use crate::remote::RemoteStore;

/// Application state shared across all handlers.
///
/// The data-access component holds the shared cache behind `Arc<RwLock<_>>`,
/// so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub data: DataAccess,
}

impl AppState {
    /// Creates a new AppState around an existing data-access component.
    pub fn new(data: DataAccess) -> Self {
        Self { data }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the collection cache with the configured expiration.
    pub fn from_config(config: &crate::config::Config, store: Arc<dyn RemoteStore>) -> Self {
        let cache = CollectionCache::new(config.cache_expiration);
        Self::new(DataAccess::new(store, cache))
    }
}

/// Strips fields that must never leave the server.
fn public_documents(mut docs: Vec<Document>) -> Vec<Document> {
    for doc in &mut docs {
        doc.remove(FIELD_PASSWORD);
    }
    docs
}

fn is_explore(doc: &Document) -> bool {
    doc.get(FIELD_EXPLORE).is_some_and(|v| v.is_truthy())
}

/// Handler for GET /api/collections/:name
pub async fn collection_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<CollectionResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(SiteError::InvalidRequest(error_msg));
    }

    let docs = state.data.get_collection(&name, &query.read_options()).await;

    Ok(Json(CollectionResponse::new(name, public_documents(docs))))
}

/// Handler for GET /api/home
///
/// Posts not flagged for the explore page, plus all stories.
pub async fn home_handler(State(state): State<AppState>) -> Json<HomeResponse> {
    let posts = state
        .data
        .get_collection(collections::POSTS, &ReadOptions::new())
        .await
        .into_iter()
        .filter(|post| !is_explore(post))
        .collect();
    let stories = state
        .data
        .get_collection(collections::STORIES, &ReadOptions::new())
        .await;

    Json(HomeResponse {
        posts: public_documents(posts),
        stories: public_documents(stories),
    })
}

/// Handler for GET /api/explore
///
/// Explore posts by `order`, posts without one last.
pub async fn explore_handler(State(state): State<AppState>) -> Json<CollectionResponse> {
    let mut explore: Vec<Document> = state
        .data
        .get_collection(collections::POSTS, &ReadOptions::new())
        .await
        .into_iter()
        .filter(is_explore)
        .collect();
    sort_documents(&mut explore, FIELD_ORDER, true);

    Json(CollectionResponse::new(
        collections::POSTS,
        public_documents(explore),
    ))
}

/// Handler for GET /api/messages
///
/// Guestbook messages, oldest first.
pub async fn messages_handler(State(state): State<AppState>) -> Json<CollectionResponse> {
    let options = ReadOptions::new().sort_by(FIELD_TIMESTAMP).ascending(true);
    let messages = state
        .data
        .get_collection(collections::GUESTBOOK, &options)
        .await;

    Json(CollectionResponse::new(
        collections::GUESTBOOK,
        public_documents(messages),
    ))
}

/// Handler for POST /like/:post_id
pub async fn like_handler(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(req): Json<LikeRequest>,
) -> Result<Json<LikeResponse>> {
    let likes = state
        .data
        .update_like_and_cache(&post_id, req.is_adding())
        .await?;

    Ok(Json(LikeResponse::new(likes)))
}

/// Handler for POST /api/messages
pub async fn save_message_handler(
    State(state): State<AppState>,
    Json(req): Json<NewMessageRequest>,
) -> Result<Json<MessageResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(SiteError::InvalidRequest(error_msg));
    }

    let saved = state.data.save_message(req.into()).await?;

    Ok(Json(MessageResponse::new(saved)))
}

/// Handler for DELETE /api/messages/:id
pub async fn delete_message_handler(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    Json(req): Json<DeleteMessageRequest>,
) -> Result<Json<SuccessResponse>> {
    state
        .data
        .delete_message(&message_id, &req.password)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Handler for DELETE /api/cache/:name
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    if !collections::is_known(&name) {
        return Err(SiteError::InvalidRequest(format!(
            "Unknown collection: {}",
            name
        )));
    }

    state.data.invalidate(&name).await;

    Ok(Json(InvalidateResponse::new(name)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.data.cache().read().await;
    Json(StatsResponse::new(
        cache.stats(),
        cache.expiration(),
        cache.snapshot_ages_at(Utc::now()),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
