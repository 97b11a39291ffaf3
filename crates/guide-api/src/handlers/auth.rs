//! Authentication handlers
//!
//! Registration, login, token refresh, logout and both password reset flows.

use axum::{extract::State, Json};
use guide_service::dto::{
    AuthResponse, BusinessRegistrationResponse, ForgotPasswordRequest, ForgotPasswordSmsRequest,
    LoginRequest, LogoutRequest, MessageResponse, RefreshTokenRequest, RegisterBusinessRequest,
    RegisterRequest, ResetPasswordRequest, ResetPasswordSmsRequest,
};
use guide_service::{AuthService, PasswordResetService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Register a business owner together with their first (pending) listing
///
/// POST /auth/register-business
pub async fn register_business(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterBusinessRequest>,
) -> ApiResult<Created<Json<BusinessRegistrationResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register_business_owner(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Refresh access token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// Logout user
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Option<Json<LogoutRequest>>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    let request = body.map(|Json(b)| b).unwrap_or_default();
    service.logout(auth.user_id, request).await?;
    Ok(NoContent)
}

/// Mail a reset link
///
/// POST /auth/password/forgot
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PasswordResetService::new(state.service_context());
    Ok(Json(service.request_email_reset(request).await?))
}

/// POST /auth/password/reset
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PasswordResetService::new(state.service_context());
    Ok(Json(service.reset_with_email_token(request).await?))
}

/// Text a six-digit reset code
///
/// POST /auth/password/forgot-sms
pub async fn forgot_password_sms(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordSmsRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PasswordResetService::new(state.service_context());
    Ok(Json(service.request_sms_reset(request).await?))
}

/// POST /auth/password/reset-sms
pub async fn reset_password_sms(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordSmsRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PasswordResetService::new(state.service_context());
    Ok(Json(service.reset_with_sms_code(request).await?))
}
