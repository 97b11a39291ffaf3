//! Contact form handler

use axum::{extract::State, Json};
use guide_service::dto::{ContactRequest, MessageResponse};
use guide_service::ContactService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Send a contact message to the site administrators
///
/// POST /contact
pub async fn send_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ContactService::new(state.service_context());
    let response = service.send(request).await?;
    Ok(Json(response))
}
