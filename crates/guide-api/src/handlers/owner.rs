//! Business owner handlers

use axum::{extract::State, Json};
use guide_service::dto::{
    BusinessResponse, CreateBusinessRequest, FavoriteFanResponse, OwnerDashboardResponse,
    UpdateBusinessRequest,
};
use guide_service::OwnerService;

use crate::extractors::{IdPath, OwnerUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /owner/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    OwnerUser(auth): OwnerUser,
) -> ApiResult<Json<OwnerDashboardResponse>> {
    let service = OwnerService::new(state.service_context());
    Ok(Json(service.dashboard(auth.user_id).await?))
}

/// GET /owner/businesses
pub async fn my_businesses(
    State(state): State<AppState>,
    OwnerUser(auth): OwnerUser,
) -> ApiResult<Json<Vec<BusinessResponse>>> {
    let service = OwnerService::new(state.service_context());
    Ok(Json(service.my_businesses(auth.user_id).await?))
}

/// Add another listing; it waits for approval like any submission
///
/// POST /owner/businesses
pub async fn create_business(
    State(state): State<AppState>,
    OwnerUser(auth): OwnerUser,
    ValidatedJson(request): ValidatedJson<CreateBusinessRequest>,
) -> ApiResult<Created<Json<BusinessResponse>>> {
    let service = OwnerService::new(state.service_context());
    let business = service.create(auth.user_id, request).await?;
    Ok(Created(Json(business)))
}

/// PATCH /owner/businesses/:id
pub async fn update_business(
    State(state): State<AppState>,
    OwnerUser(auth): OwnerUser,
    IdPath(business_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateBusinessRequest>,
) -> ApiResult<Json<BusinessResponse>> {
    let service = OwnerService::new(state.service_context());
    let business = service.update_own(auth.user_id, business_id, request).await?;
    Ok(Json(business))
}

/// Users who saved one of the caller's businesses
///
/// GET /owner/businesses/:id/favorites
pub async fn business_favorites(
    State(state): State<AppState>,
    OwnerUser(auth): OwnerUser,
    IdPath(business_id): IdPath,
) -> ApiResult<Json<Vec<FavoriteFanResponse>>> {
    let service = OwnerService::new(state.service_context());
    let fans = service.business_favorites(auth.user_id, business_id).await?;
    Ok(Json(fans))
}
