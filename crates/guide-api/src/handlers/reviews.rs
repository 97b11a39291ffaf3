//! Review handlers

use axum::extract::State;
use guide_service::ReviewService;

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Delete a review written by the caller (admins may delete any)
///
/// DELETE /reviews/:id
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(review_id): IdPath,
) -> ApiResult<NoContent> {
    let service = ReviewService::new(state.service_context());
    service.delete_review(auth.user_id, review_id).await?;
    Ok(NoContent)
}
