//! Photo API endpoints.

use axum::extract::State;

use super::{success, ApiResult, AppJson};
use crate::models::{Photo, UploadPhotoRequest};
use crate::AppState;

/// GET /api/photos - List the gallery, most recent first.
pub async fn list_photos(State(state): State<AppState>) -> ApiResult<Vec<Photo>> {
    success(state.repo.list_photos().await?)
}

/// POST /api/photos - Upload a photo.
pub async fn upload_photo(
    State(state): State<AppState>,
    AppJson(request): AppJson<UploadPhotoRequest>,
) -> ApiResult<Photo> {
    let photo = request.into_photo()?;
    let saved = state.repo.save_photo(photo).await?;
    tracing::info!("Uploaded photo {}", saved.id);
    success(saved)
}
