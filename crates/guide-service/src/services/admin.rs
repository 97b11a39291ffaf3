//! Admin service: moderation, statistics, users, categories and the audit log
//!
//! Every call that changes data records exactly one admin log entry.

use chrono::{Duration, Utc};
use tracing::{info, instrument};

use guide_core::entities::{
    AdminAction, BusinessOrigin, BusinessStatusFilter, Category, NewCategory, ReviewStatusFilter,
    User,
};
use guide_core::value_objects::Roles;
use guide_core::DomainError;

use crate::dto::{
    AdminLogResponse, AdminStatsResponse, AssignOwnerRequest, BusinessResponse,
    CategoryCountResponse, CategoryResponse, CreateBusinessRequest, CreateCategoryRequest,
    ReviewResponse, UpdateBusinessRequest, UpdateCategoryRequest, UserSummaryResponse,
};

use super::access::{ensure_category, find_business, require_admin};
use super::audit::AuditLogger;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::submission::new_business;

/// Upper bound for the log view
pub const MAX_LOG_ENTRIES: i64 = 100;
const TOP_CATEGORIES: i64 = 5;
const RECENT_DAYS: i64 = 7;
const BAN_DAYS: i64 = 365;

pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn audit(&self) -> AuditLogger<'a> {
        AuditLogger::new(self.ctx)
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn stats(&self, admin_id: i64) -> ServiceResult<AdminStatsResponse> {
        require_admin(self.ctx, admin_id).await?;
        let since = Utc::now() - Duration::days(RECENT_DAYS);

        let businesses = self.ctx.business_repo();
        let users = self.ctx.user_repo();
        let reviews = self.ctx.review_repo();

        Ok(AdminStatsResponse {
            total_businesses: businesses.count().await?,
            total_users: users.count().await?,
            total_reviews: reviews.count().await?,
            total_categories: self.ctx.category_repo().count().await?,
            total_favorites: self.ctx.favorite_repo().count().await?,
            total_business_owners: users.count_with_role(Roles::BUSINESS_OWNER).await?,
            pending_businesses: businesses.count_pending().await?,
            pending_reviews: reviews.count_pending().await?,
            new_businesses_last_7_days: businesses.count_created_since(since).await?,
            new_users_last_7_days: users.count_created_since(since).await?,
            new_reviews_last_7_days: reviews.count_created_since(since).await?,
            top_categories: businesses
                .top_categories(TOP_CATEGORIES)
                .await?
                .into_iter()
                .map(CategoryCountResponse::from)
                .collect(),
        })
    }

    // ========================================================================
    // Businesses
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_businesses(
        &self,
        admin_id: i64,
        status: BusinessStatusFilter,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<BusinessResponse>> {
        require_admin(self.ctx, admin_id).await?;
        let businesses = self
            .ctx
            .business_repo()
            .list_by_status(status, limit, offset)
            .await?;
        Ok(businesses.iter().map(BusinessResponse::from).collect())
    }

    /// Create a business that is public immediately
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_business(
        &self,
        admin_id: i64,
        request: CreateBusinessRequest,
    ) -> ServiceResult<BusinessResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        ensure_category(self.ctx, request.category_id).await?;

        let new = new_business(request, BusinessOrigin::Admin, None, admin.id)?;
        let business = self.ctx.business_repo().create(&new).await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Create,
                "Business",
                business.id,
                format!("Created business: {}", business.name),
            )
            .await;

        Ok(BusinessResponse::from(business))
    }

    #[instrument(skip(self, request))]
    pub async fn update_business(
        &self,
        admin_id: i64,
        business_id: i64,
        request: UpdateBusinessRequest,
    ) -> ServiceResult<BusinessResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let mut business = find_business(self.ctx, business_id).await?;
        ensure_category(self.ctx, request.category_id).await?;

        business.apply(request.into_patch()?);
        self.ctx.business_repo().update(&business).await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Update,
                "Business",
                business_id,
                format!("Updated business: {}", business.name),
            )
            .await;

        Ok(BusinessResponse::from(business))
    }

    #[instrument(skip(self))]
    pub async fn delete_business(&self, admin_id: i64, business_id: i64) -> ServiceResult<()> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let business = find_business(self.ctx, business_id).await?;

        self.ctx.business_repo().delete(business_id).await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Delete,
                "Business",
                business_id,
                format!("Deleted business: {}", business.name),
            )
            .await;

        Ok(())
    }

    /// Approve a business; it becomes active and publicly visible
    #[instrument(skip(self))]
    pub async fn approve_business(
        &self,
        admin_id: i64,
        business_id: i64,
    ) -> ServiceResult<BusinessResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let mut business = find_business(self.ctx, business_id).await?;

        business.approve();
        self.ctx.business_repo().update(&business).await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Approve,
                "Business",
                business_id,
                format!("Approved business: {}", business.name),
            )
            .await;

        info!(business_id, "Business approved");
        Ok(BusinessResponse::from(business))
    }

    /// Reject a business; it is hidden from all public listings
    #[instrument(skip(self))]
    pub async fn reject_business(
        &self,
        admin_id: i64,
        business_id: i64,
    ) -> ServiceResult<BusinessResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let mut business = find_business(self.ctx, business_id).await?;

        business.reject();
        self.ctx.business_repo().update(&business).await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Reject,
                "Business",
                business_id,
                format!("Rejected business: {}", business.name),
            )
            .await;

        info!(business_id, "Business rejected");
        Ok(BusinessResponse::from(business))
    }

    /// Assign a business to a user holding the business owner role
    #[instrument(skip(self, request), fields(owner_id = request.owner_id))]
    pub async fn assign_owner(
        &self,
        admin_id: i64,
        business_id: i64,
        request: AssignOwnerRequest,
    ) -> ServiceResult<BusinessResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let mut business = find_business(self.ctx, business_id).await?;
        let owner = self.find_user(request.owner_id).await?;

        if !owner.roles.has(Roles::BUSINESS_OWNER) {
            return Err(DomainError::NotABusinessOwner.into());
        }

        self.ctx
            .business_repo()
            .set_owner(business_id, Some(owner.id))
            .await?;
        business.owner_id = Some(owner.id);

        self.audit()
            .record(
                admin.id,
                AdminAction::AssignOwner,
                "Business",
                business_id,
                format!("Assigned {} as owner of {}", owner.email, business.name),
            )
            .await;

        Ok(BusinessResponse::from(business))
    }

    #[instrument(skip(self))]
    pub async fn unassign_owner(
        &self,
        admin_id: i64,
        business_id: i64,
    ) -> ServiceResult<BusinessResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let mut business = find_business(self.ctx, business_id).await?;

        self.ctx.business_repo().set_owner(business_id, None).await?;
        business.owner_id = None;

        self.audit()
            .record(
                admin.id,
                AdminAction::UnassignOwner,
                "Business",
                business_id,
                format!("Removed owner of {}", business.name),
            )
            .await;

        Ok(BusinessResponse::from(business))
    }

    // ========================================================================
    // Reviews
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_reviews(
        &self,
        admin_id: i64,
        status: ReviewStatusFilter,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<ReviewResponse>> {
        require_admin(self.ctx, admin_id).await?;
        let reviews = self
            .ctx
            .review_repo()
            .list_by_status(status, limit, offset)
            .await?;
        Ok(reviews.into_iter().map(ReviewResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn approve_review(
        &self,
        admin_id: i64,
        review_id: i64,
    ) -> ServiceResult<ReviewResponse> {
        self.moderate_review(admin_id, review_id, true).await
    }

    /// Reject a review; it is also deactivated and drops out of the rating
    #[instrument(skip(self))]
    pub async fn reject_review(
        &self,
        admin_id: i64,
        review_id: i64,
    ) -> ServiceResult<ReviewResponse> {
        self.moderate_review(admin_id, review_id, false).await
    }

    async fn moderate_review(
        &self,
        admin_id: i64,
        review_id: i64,
        approve: bool,
    ) -> ServiceResult<ReviewResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let review = self
            .ctx
            .review_repo()
            .set_status_and_refresh_rating(review_id, approve, approve)
            .await?;

        let (action, verb) = if approve {
            (AdminAction::Approve, "Approved")
        } else {
            (AdminAction::Reject, "Rejected")
        };
        self.audit()
            .record(
                admin.id,
                action,
                "Review",
                review_id,
                format!("{verb} review {review_id} on business {}", review.business_id),
            )
            .await;

        Ok(ReviewResponse::from(review))
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, admin_id: i64, review_id: i64) -> ServiceResult<()> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let review = self
            .ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        self.ctx
            .review_repo()
            .delete_and_refresh_rating(review_id)
            .await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Delete,
                "Review",
                review_id,
                format!("Deleted review {review_id} on business {}", review.business_id),
            )
            .await;

        Ok(())
    }

    // ========================================================================
    // Users
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        admin_id: i64,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<Vec<UserSummaryResponse>> {
        require_admin(self.ctx, admin_id).await?;
        let users = self.ctx.user_repo().list(limit, offset).await?;
        Ok(users.iter().map(UserSummaryResponse::from).collect())
    }

    /// Lock a user out for a year
    #[instrument(skip(self))]
    pub async fn ban_user(
        &self,
        admin_id: i64,
        user_id: i64,
    ) -> ServiceResult<UserSummaryResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        if admin.id == user_id {
            return Err(DomainError::CannotBanSelf.into());
        }
        let mut user = self.find_user(user_id).await?;

        let until = Utc::now() + Duration::days(BAN_DAYS);
        self.ctx.user_repo().set_lockout(user_id, Some(until)).await?;
        user.lockout_end = Some(until);

        self.audit()
            .record(
                admin.id,
                AdminAction::Ban,
                "User",
                user_id,
                format!("Banned user {}", user.email),
            )
            .await;

        info!(user_id, "User banned");
        Ok(UserSummaryResponse::from(&user))
    }

    #[instrument(skip(self))]
    pub async fn unban_user(
        &self,
        admin_id: i64,
        user_id: i64,
    ) -> ServiceResult<UserSummaryResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let mut user = self.find_user(user_id).await?;

        self.ctx.user_repo().set_lockout(user_id, None).await?;
        user.lockout_end = None;

        self.audit()
            .record(
                admin.id,
                AdminAction::Unban,
                "User",
                user_id,
                format!("Unbanned user {}", user.email),
            )
            .await;

        Ok(UserSummaryResponse::from(&user))
    }

    /// Grant a role by name: `Admin`, `User` or `BusinessOwner`
    #[instrument(skip(self))]
    pub async fn add_role(
        &self,
        admin_id: i64,
        user_id: i64,
        role_name: &str,
    ) -> ServiceResult<UserSummaryResponse> {
        self.change_role(admin_id, user_id, role_name, true).await
    }

    #[instrument(skip(self))]
    pub async fn remove_role(
        &self,
        admin_id: i64,
        user_id: i64,
        role_name: &str,
    ) -> ServiceResult<UserSummaryResponse> {
        self.change_role(admin_id, user_id, role_name, false).await
    }

    async fn change_role(
        &self,
        admin_id: i64,
        user_id: i64,
        role_name: &str,
        grant: bool,
    ) -> ServiceResult<UserSummaryResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let role = Roles::parse(role_name)
            .ok_or_else(|| ServiceError::validation(format!("Unknown role: {role_name}")))?;
        let mut user = self.find_user(user_id).await?;

        if grant {
            user.roles.insert(role);
        } else {
            user.roles.remove(role);
        }
        self.ctx.user_repo().set_roles(user_id, user.roles).await?;

        let (action, description) = if grant {
            (AdminAction::AddRole, format!("Added role {role} to {}", user.email))
        } else {
            (AdminAction::RemoveRole, format!("Removed role {role} from {}", user.email))
        };
        self.audit()
            .record(admin.id, action, "User", user_id, description)
            .await;

        Ok(UserSummaryResponse::from(&user))
    }

    async fn find_user(&self, user_id: i64) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    // ========================================================================
    // Audit log
    // ========================================================================

    /// Latest admin log entries, at most 100
    #[instrument(skip(self))]
    pub async fn logs(
        &self,
        admin_id: i64,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<AdminLogResponse>> {
        require_admin(self.ctx, admin_id).await?;
        let limit = limit.unwrap_or(MAX_LOG_ENTRIES).clamp(1, MAX_LOG_ENTRIES);
        let logs = self.ctx.admin_log_repo().latest(limit).await?;
        Ok(logs.into_iter().map(AdminLogResponse::from).collect())
    }

    // ========================================================================
    // Categories
    // ========================================================================

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_category(
        &self,
        admin_id: i64,
        request: CreateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let category = self
            .ctx
            .category_repo()
            .create(&NewCategory {
                name: request.name.trim().to_string(),
                description: request.description,
                icon: request.icon,
            })
            .await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Create,
                "Category",
                category.id,
                format!("Created category: {}", category.name),
            )
            .await;

        Ok(CategoryResponse::from(category))
    }

    #[instrument(skip(self, request))]
    pub async fn update_category(
        &self,
        admin_id: i64,
        category_id: i64,
        request: UpdateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let mut category = self.find_category(category_id).await?;

        if let Some(name) = request.name {
            category.name = name.trim().to_string();
        }
        if let Some(description) = request.description {
            category.description = Some(description);
        }
        if let Some(icon) = request.icon {
            category.icon = Some(icon);
        }
        self.ctx.category_repo().update(&category).await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Update,
                "Category",
                category_id,
                format!("Updated category: {}", category.name),
            )
            .await;

        Ok(CategoryResponse::from(category))
    }

    /// Delete a category; its businesses become uncategorized
    #[instrument(skip(self))]
    pub async fn delete_category(&self, admin_id: i64, category_id: i64) -> ServiceResult<()> {
        let admin = require_admin(self.ctx, admin_id).await?;
        let category = self.find_category(category_id).await?;

        self.ctx.category_repo().delete(category_id).await?;

        self.audit()
            .record(
                admin.id,
                AdminAction::Delete,
                "Category",
                category_id,
                format!("Deleted category: {}", category.name),
            )
            .await;

        Ok(())
    }

    async fn find_category(&self, id: i64) -> ServiceResult<Category> {
        self.ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(id).into())
    }
}
