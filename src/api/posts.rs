//! Post API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{success, ApiResult, AppJson};
use crate::errors::AppError;
use crate::models::{Post, SavePostRequest};
use crate::render::{render_blocks, ContentBlock};
use crate::AppState;

/// Query parameters for listing posts.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    /// Search text matched against title, tags and category
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/posts - List posts, optionally filtered by `q`.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> ApiResult<Vec<Post>> {
    let posts = match query.q.as_deref() {
        Some(q) => state.repo.search_posts(q).await?,
        None => state.repo.list_posts().await?,
    };
    success(posts)
}

/// GET /api/posts/:id - Get a single post.
pub async fn get_post(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Post> {
    match state.repo.get_post(&id).await? {
        Some(post) => success(post),
        None => Err(AppError::NotFound(format!("Post {} not found", id))),
    }
}

/// GET /api/posts/:id/blocks - Get a post's content split into display blocks.
pub async fn get_post_blocks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<ContentBlock>> {
    match state.repo.get_post(&id).await? {
        Some(post) => success(render_blocks(&post.content)),
        None => Err(AppError::NotFound(format!("Post {} not found", id))),
    }
}

/// GET /api/categories - Distinct categories for editor suggestions.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    success(state.repo.list_categories().await?)
}

/// POST /api/posts - Create a post under a new id.
pub async fn create_post(
    State(state): State<AppState>,
    AppJson(request): AppJson<SavePostRequest>,
) -> ApiResult<Post> {
    let post = request.into_post(uuid::Uuid::new_v4().to_string())?;
    let saved = state.repo.save_post(post).await?;
    tracing::info!("Created post {}", saved.id);
    success(saved)
}

/// PUT /api/posts/:id - Replace a post, creating it when the id is unknown.
pub async fn save_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<SavePostRequest>,
) -> ApiResult<Post> {
    if id.trim().is_empty() {
        return Err(AppError::Validation("Post id is required".to_string()));
    }

    let post = request.into_post(id)?;
    let saved = state.repo.save_post(post).await?;
    tracing::info!("Saved post {}", saved.id);
    success(saved)
}

/// DELETE /api/posts/:id - Delete a post; unknown ids succeed.
pub async fn delete_post(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_post(&id).await?;
    tracing::info!("Deleted post {}", id);
    success(())
}
