//! Public directory handlers
//!
//! Home page aggregates, search, details, categories and map settings.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use guide_service::dto::{
    BusinessDetailsResponse, BusinessResponse, BusinessSearchParams, CategoryResponse,
    HomeResponse, LocationResponse, MapConfigResponse, PaginatedResponse,
};
use guide_service::DirectoryService;

use crate::extractors::{IdPath, OptionalAuthUser, Pagination};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /home
pub async fn home(State(state): State<AppState>) -> ApiResult<Json<HomeResponse>> {
    let service = DirectoryService::new(state.service_context());
    Ok(Json(service.home().await?))
}

/// Search approved, active businesses
///
/// GET /businesses?query=&category=&min_rating=&price_range=&sort_by=&page=&per_page=
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<BusinessSearchParams>, QueryRejection>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<BusinessResponse>>> {
    let Query(params) = params.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = DirectoryService::new(state.service_context());
    let page = service
        .search(params, pagination.page, pagination.per_page)
        .await?;
    Ok(Json(page))
}

/// Map markers for every visible business with coordinates
///
/// GET /businesses/locations
pub async fn locations(State(state): State<AppState>) -> ApiResult<Json<Vec<LocationResponse>>> {
    let service = DirectoryService::new(state.service_context());
    Ok(Json(service.locations().await?))
}

/// Business details; pending listings are only shown to their owner and admins
///
/// GET /businesses/:id
pub async fn business_details(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<BusinessDetailsResponse>> {
    let service = DirectoryService::new(state.service_context());
    let details = service.business_details(id, viewer.user_id()).await?;
    Ok(Json(details))
}

/// GET /categories
pub async fn categories(State(state): State<AppState>) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let service = DirectoryService::new(state.service_context());
    Ok(Json(service.categories().await?))
}

/// GET /categories/:id
pub async fn category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<CategoryResponse>> {
    let service = DirectoryService::new(state.service_context());
    Ok(Json(service.category(id).await?))
}

/// GET /map/config
pub async fn map_config(State(state): State<AppState>) -> Json<MapConfigResponse> {
    Json(DirectoryService::new(state.service_context()).map_config())
}
