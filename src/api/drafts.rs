//! Draft preview and generation endpoints.

use axum::extract::State;

use super::{success, ApiResult, AppJson};
use crate::generation::DraftAssistant;
use crate::models::{Draft, GenerateRequest, PreviewRequest};
use crate::render::{render_preview, ContentBlock};
use crate::AppState;

/// POST /api/preview - Render unsaved draft content.
pub async fn preview_draft(
    AppJson(request): AppJson<PreviewRequest>,
) -> ApiResult<Vec<ContentBlock>> {
    success(render_preview(&request.content))
}

/// POST /api/generate - Append generated text to a draft.
///
/// Each request is one generation round trip: the assistant lives for the
/// request only, so the in-flight state is not shared between requests. On
/// failure the error envelope is returned and the caller keeps its own copy
/// of the draft.
pub async fn generate_draft(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> ApiResult<Draft> {
    let mut assistant = DraftAssistant::new(state.generator.clone());
    let mut draft = request.draft;

    let result = assistant.generate_into(&request.topic, &mut draft).await;
    tracing::debug!("Draft assistant finished in state {:?}", assistant.state());
    result?;

    success(draft)
}
