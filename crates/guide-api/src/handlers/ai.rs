//! AI assistant handler

use axum::{extract::State, Json};
use guide_service::dto::{ChatRequest, ChatResponse};
use guide_service::AssistantService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Ask the assistant for local recommendations
///
/// POST /api/ai/chat
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let service = AssistantService::new(state.service_context());
    let response = service.chat(request).await?;
    Ok(Json(response))
}
