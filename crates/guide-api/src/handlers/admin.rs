//! Admin panel handlers
//!
//! Every mutating endpoint here is recorded in the admin log by the service.

use axum::{
    extract::{Query, State},
    Json,
};
use guide_service::dto::{
    AdminLogResponse, AdminStatsResponse, AssignOwnerRequest, BusinessResponse,
    BusinessStatusQuery, CategoryResponse, CreateBusinessRequest, CreateCategoryRequest,
    CreateNewsRequest, LogsQuery, NewsResponse, ReviewResponse, ReviewStatusQuery,
    UpdateBusinessRequest, UpdateCategoryRequest, UpdateNewsRequest, UserSummaryResponse,
};
use guide_service::{AdminService, NewsService};

use crate::extractors::{AdminUser, IdPath, Pagination, UserRolePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /admin/stats
pub async fn stats(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Json<AdminStatsResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.stats(admin.user_id).await?))
}

// ----------------------------------------------------------------------------
// Businesses
// ----------------------------------------------------------------------------

/// GET /admin/businesses?status=pending|approved|all
pub async fn list_businesses(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(query): Query<BusinessStatusQuery>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<BusinessResponse>>> {
    let service = AdminService::new(state.service_context());
    let businesses = service
        .list_businesses(
            admin.user_id,
            query.status,
            pagination.limit(),
            pagination.offset(),
        )
        .await?;
    Ok(Json(businesses))
}

/// Create a listing directly (approved immediately)
///
/// POST /admin/businesses
pub async fn create_business(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateBusinessRequest>,
) -> ApiResult<Created<Json<BusinessResponse>>> {
    let service = AdminService::new(state.service_context());
    let business = service.create_business(admin.user_id, request).await?;
    Ok(Created(Json(business)))
}

/// PATCH /admin/businesses/:id
pub async fn update_business(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(business_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateBusinessRequest>,
) -> ApiResult<Json<BusinessResponse>> {
    let service = AdminService::new(state.service_context());
    let business = service
        .update_business(admin.user_id, business_id, request)
        .await?;
    Ok(Json(business))
}

/// DELETE /admin/businesses/:id
pub async fn delete_business(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(business_id): IdPath,
) -> ApiResult<NoContent> {
    let service = AdminService::new(state.service_context());
    service.delete_business(admin.user_id, business_id).await?;
    Ok(NoContent)
}

/// POST /admin/businesses/:id/approve
pub async fn approve_business(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(business_id): IdPath,
) -> ApiResult<Json<BusinessResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.approve_business(admin.user_id, business_id).await?))
}

/// POST /admin/businesses/:id/reject
pub async fn reject_business(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(business_id): IdPath,
) -> ApiResult<Json<BusinessResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.reject_business(admin.user_id, business_id).await?))
}

/// PUT /admin/businesses/:id/owner
pub async fn assign_owner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(business_id): IdPath,
    Json(request): Json<AssignOwnerRequest>,
) -> ApiResult<Json<BusinessResponse>> {
    let service = AdminService::new(state.service_context());
    let business = service
        .assign_owner(admin.user_id, business_id, request)
        .await?;
    Ok(Json(business))
}

/// DELETE /admin/businesses/:id/owner
pub async fn unassign_owner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(business_id): IdPath,
) -> ApiResult<Json<BusinessResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.unassign_owner(admin.user_id, business_id).await?))
}

// ----------------------------------------------------------------------------
// Reviews
// ----------------------------------------------------------------------------

/// GET /admin/reviews?status=pending|all
pub async fn list_reviews(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(query): Query<ReviewStatusQuery>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ReviewResponse>>> {
    let service = AdminService::new(state.service_context());
    let reviews = service
        .list_reviews(
            admin.user_id,
            query.status,
            pagination.limit(),
            pagination.offset(),
        )
        .await?;
    Ok(Json(reviews))
}

/// POST /admin/reviews/:id/approve
pub async fn approve_review(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(review_id): IdPath,
) -> ApiResult<Json<ReviewResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.approve_review(admin.user_id, review_id).await?))
}

/// POST /admin/reviews/:id/reject
pub async fn reject_review(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(review_id): IdPath,
) -> ApiResult<Json<ReviewResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.reject_review(admin.user_id, review_id).await?))
}

/// DELETE /admin/reviews/:id
pub async fn delete_review(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(review_id): IdPath,
) -> ApiResult<NoContent> {
    let service = AdminService::new(state.service_context());
    service.delete_review(admin.user_id, review_id).await?;
    Ok(NoContent)
}

// ----------------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------------

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<UserSummaryResponse>>> {
    let service = AdminService::new(state.service_context());
    let users = service
        .list_users(admin.user_id, pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(users))
}

/// POST /admin/users/:id/ban
pub async fn ban_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserSummaryResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.ban_user(admin.user_id, user_id).await?))
}

/// POST /admin/users/:id/unban
pub async fn unban_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserSummaryResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.unban_user(admin.user_id, user_id).await?))
}

/// PUT /admin/users/:id/roles/:role
pub async fn add_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    path: UserRolePath,
) -> ApiResult<Json<UserSummaryResponse>> {
    let service = AdminService::new(state.service_context());
    let user = service
        .add_role(admin.user_id, path.user_id, &path.role)
        .await?;
    Ok(Json(user))
}

/// DELETE /admin/users/:id/roles/:role
pub async fn remove_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    path: UserRolePath,
) -> ApiResult<Json<UserSummaryResponse>> {
    let service = AdminService::new(state.service_context());
    let user = service
        .remove_role(admin.user_id, path.user_id, &path.role)
        .await?;
    Ok(Json(user))
}

/// Latest admin log entries, newest first
///
/// GET /admin/logs?limit=
pub async fn logs(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(query): Query<LogsQuery>,
) -> ApiResult<Json<Vec<AdminLogResponse>>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.logs(admin.user_id, query.limit).await?))
}

// ----------------------------------------------------------------------------
// Categories
// ----------------------------------------------------------------------------

/// POST /admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let service = AdminService::new(state.service_context());
    let category = service.create_category(admin.user_id, request).await?;
    Ok(Created(Json(category)))
}

/// PATCH /admin/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(category_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    let service = AdminService::new(state.service_context());
    let category = service
        .update_category(admin.user_id, category_id, request)
        .await?;
    Ok(Json(category))
}

/// DELETE /admin/categories/:id
pub async fn delete_category(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(category_id): IdPath,
) -> ApiResult<NoContent> {
    let service = AdminService::new(state.service_context());
    service.delete_category(admin.user_id, category_id).await?;
    Ok(NoContent)
}

// ----------------------------------------------------------------------------
// News
// ----------------------------------------------------------------------------

/// POST /admin/news
pub async fn create_news(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateNewsRequest>,
) -> ApiResult<Created<Json<NewsResponse>>> {
    let service = NewsService::new(state.service_context());
    let article = service.create(admin.user_id, request).await?;
    Ok(Created(Json(article)))
}

/// PATCH /admin/news/:id
pub async fn update_news(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateNewsRequest>,
) -> ApiResult<Json<NewsResponse>> {
    let service = NewsService::new(state.service_context());
    Ok(Json(service.update(admin.user_id, id, request).await?))
}

/// DELETE /admin/news/:id
pub async fn delete_news(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = NewsService::new(state.service_context());
    service.delete(admin.user_id, id).await?;
    Ok(NoContent)
}
