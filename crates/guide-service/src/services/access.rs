//! Role and ownership checks shared by services
//!
//! Roles are read from the stored user rather than the token so that a ban
//! or role change takes effect on the next request.

use chrono::Utc;
use guide_core::entities::{Business, User};
use guide_core::value_objects::Roles;
use guide_core::DomainError;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Load the acting user; a locked-out account is refused
pub(crate) async fn load_actor(ctx: &ServiceContext, user_id: i64) -> ServiceResult<User> {
    let user = ctx
        .user_repo()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", user_id))?;

    if user.is_locked_out(Utc::now()) {
        return Err(DomainError::AccountLocked.into());
    }

    Ok(user)
}

/// Load the acting user and require a role
pub(crate) async fn require_role(
    ctx: &ServiceContext,
    user_id: i64,
    role: Roles,
    role_name: &'static str,
) -> ServiceResult<User> {
    let user = load_actor(ctx, user_id).await?;
    if !user.roles.has(role) {
        return Err(DomainError::MissingRole(role_name).into());
    }
    Ok(user)
}

pub(crate) async fn require_admin(ctx: &ServiceContext, user_id: i64) -> ServiceResult<User> {
    require_role(ctx, user_id, Roles::ADMIN, "Admin").await
}

pub(crate) async fn require_owner(ctx: &ServiceContext, user_id: i64) -> ServiceResult<User> {
    require_role(ctx, user_id, Roles::BUSINESS_OWNER, "BusinessOwner").await
}

pub(crate) async fn find_business(ctx: &ServiceContext, id: i64) -> ServiceResult<Business> {
    ctx.business_repo()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::BusinessNotFound(id).into())
}

/// Fail when a referenced category does not exist
pub(crate) async fn ensure_category(ctx: &ServiceContext, id: Option<i64>) -> ServiceResult<()> {
    if let Some(id) = id {
        if ctx.category_repo().find_by_id(id).await?.is_none() {
            return Err(DomainError::CategoryNotFound(id).into());
        }
    }
    Ok(())
}
