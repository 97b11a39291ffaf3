//! Business owner workspace
//!
//! Owners see and edit only the businesses assigned to them. A business
//! owned by someone else is reported as not found.

use tracing::{info, instrument};

use guide_core::entities::{Business, BusinessOrigin};
use guide_core::DomainError;

use crate::dto::{
    BusinessResponse, CreateBusinessRequest, FavoriteFanResponse, OwnerDashboardResponse,
    UpdateBusinessRequest,
};

use super::access::{ensure_category, find_business, require_owner};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::submission::new_business;

/// Summarize an owner's businesses
pub(crate) fn summarize(businesses: &[Business], total_favorites: i64) -> OwnerDashboardResponse {
    let rated: Vec<f64> = businesses
        .iter()
        .filter(|b| b.total_reviews > 0)
        .map(|b| b.average_rating)
        .collect();
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        rated.iter().sum::<f64>() / rated.len() as f64
    };
    let approved = businesses.iter().filter(|b| b.is_approved).count() as i64;
    let total = businesses.len() as i64;

    OwnerDashboardResponse {
        total_businesses: total,
        approved_businesses: approved,
        pending_businesses: total - approved,
        total_reviews: businesses.iter().map(|b| i64::from(b.total_reviews)).sum(),
        average_rating,
        total_favorites,
    }
}

pub struct OwnerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OwnerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self, user_id: i64) -> ServiceResult<OwnerDashboardResponse> {
        let owner = require_owner(self.ctx, user_id).await?;
        let businesses = self.ctx.business_repo().find_by_owner(owner.id).await?;
        let favorites = self.ctx.favorite_repo().count_for_owner(owner.id).await?;
        Ok(summarize(&businesses, favorites))
    }

    #[instrument(skip(self))]
    pub async fn my_businesses(&self, user_id: i64) -> ServiceResult<Vec<BusinessResponse>> {
        let owner = require_owner(self.ctx, user_id).await?;
        let businesses = self.ctx.business_repo().find_by_owner(owner.id).await?;
        Ok(businesses.iter().map(BusinessResponse::from).collect())
    }

    /// Create a business owned by the caller; it waits for approval
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        user_id: i64,
        request: CreateBusinessRequest,
    ) -> ServiceResult<BusinessResponse> {
        let owner = require_owner(self.ctx, user_id).await?;
        ensure_category(self.ctx, request.category_id).await?;

        let new = new_business(request, BusinessOrigin::Owner, Some(owner.id), owner.id)?;
        let business = self.ctx.business_repo().create(&new).await?;

        info!(business_id = business.id, "Owner created business");
        Ok(BusinessResponse::from(business))
    }

    /// Edit an owned business; activation and featuring stay with admins
    #[instrument(skip(self, request))]
    pub async fn update_own(
        &self,
        user_id: i64,
        business_id: i64,
        request: UpdateBusinessRequest,
    ) -> ServiceResult<BusinessResponse> {
        let owner = require_owner(self.ctx, user_id).await?;
        let mut business = self.owned_business(owner.id, business_id).await?;
        ensure_category(self.ctx, request.category_id).await?;

        business.apply(request.into_patch()?.without_admin_fields());
        self.ctx.business_repo().update(&business).await?;

        info!(business_id, "Owner updated business");
        Ok(BusinessResponse::from(business))
    }

    /// Users who bookmarked an owned business
    #[instrument(skip(self))]
    pub async fn business_favorites(
        &self,
        user_id: i64,
        business_id: i64,
    ) -> ServiceResult<Vec<FavoriteFanResponse>> {
        let owner = require_owner(self.ctx, user_id).await?;
        self.owned_business(owner.id, business_id).await?;

        let fans = self.ctx.favorite_repo().fans_of(business_id).await?;
        Ok(fans.into_iter().map(FavoriteFanResponse::from).collect())
    }

    async fn owned_business(&self, owner_id: i64, business_id: i64) -> ServiceResult<Business> {
        let business = find_business(self.ctx, business_id).await?;
        if !business.is_owned_by(owner_id) {
            return Err(DomainError::BusinessNotFound(business_id).into());
        }
        Ok(business)
    }
}
