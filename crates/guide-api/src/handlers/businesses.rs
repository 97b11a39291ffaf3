//! Signed-in business actions: submissions, favorites and reviews

use axum::{extract::State, Json};
use guide_service::dto::{
    BusinessResponse, CreateBusinessRequest, CreateReviewRequest, FavoriteToggleResponse,
    ReviewResponse,
};
use guide_service::{BusinessSubmissionService, FavoriteService, ReviewService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Suggest a new business; it stays hidden until an admin approves it
///
/// POST /businesses
pub async fn submit_business(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBusinessRequest>,
) -> ApiResult<Created<Json<BusinessResponse>>> {
    let service = BusinessSubmissionService::new(state.service_context());
    let business = service.submit(auth.user_id, request).await?;
    Ok(Created(Json(business)))
}

/// Add or remove a business from the caller's favorites
///
/// POST /businesses/:id/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(business_id): IdPath,
) -> ApiResult<Json<FavoriteToggleResponse>> {
    let service = FavoriteService::new(state.service_context());
    let response = service.toggle(auth.user_id, business_id).await?;
    Ok(Json(response))
}

/// Review a business (one review per user and business)
///
/// POST /businesses/:id/reviews
pub async fn add_review(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(business_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> ApiResult<Created<Json<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let review = service.add_review(auth.user_id, business_id, request).await?;
    Ok(Created(Json(review)))
}
