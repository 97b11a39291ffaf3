//! Current-user handlers
//!
//! Profile, password change, own reviews, favorites and photos.

use axum::{extract::State, Json};
use guide_service::dto::{
    AddPhotoRequest, BusinessResponse, ChangePasswordRequest, CurrentUserResponse, ReviewResponse,
    UpdateProfileRequest, UserPhotoResponse,
};
use guide_service::{AuthService, FavoriteService, ProfileService, ReviewService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.me(auth.user_id).await?))
}

/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.update_profile(auth.user_id, request).await?))
}

/// POST /users/@me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;
    Ok(NoContent)
}

/// GET /users/@me/reviews
pub async fn my_reviews(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.my_reviews(auth.user_id).await?))
}

/// GET /users/@me/favorites
pub async fn my_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<BusinessResponse>>> {
    let service = FavoriteService::new(state.service_context());
    Ok(Json(service.my_favorites(auth.user_id).await?))
}

/// GET /users/@me/photos
pub async fn my_photos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserPhotoResponse>>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.photos(auth.user_id).await?))
}

/// POST /users/@me/photos
pub async fn add_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddPhotoRequest>,
) -> ApiResult<Created<Json<UserPhotoResponse>>> {
    let service = ProfileService::new(state.service_context());
    let photo = service.add_photo(auth.user_id, request).await?;
    Ok(Created(Json(photo)))
}

/// DELETE /users/@me/photos/:id
pub async fn delete_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(photo_id): IdPath,
) -> ApiResult<NoContent> {
    let service = ProfileService::new(state.service_context());
    service.delete_photo(auth.user_id, photo_id).await?;
    Ok(NoContent)
}
