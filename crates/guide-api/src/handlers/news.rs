//! Public news handlers

use axum::{extract::State, Json};
use guide_service::dto::{NewsResponse, PaginatedResponse};
use guide_service::NewsService;

use crate::extractors::{IdPath, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /news
pub async fn list_news(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<NewsResponse>>> {
    let service = NewsService::new(state.service_context());
    let page = service.list(pagination.page, pagination.per_page).await?;
    Ok(Json(page))
}

/// Read one article and count the view
///
/// GET /news/:id
pub async fn get_news(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<NewsResponse>> {
    let service = NewsService::new(state.service_context());
    Ok(Json(service.get(id).await?))
}
