//! Favorites service

use tracing::{info, instrument};

use crate::dto::{BusinessResponse, FavoriteToggleResponse};

use super::access::find_business;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct FavoriteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FavoriteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add the business to the user's favorites, or remove it if already there
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        user_id: i64,
        business_id: i64,
    ) -> ServiceResult<FavoriteToggleResponse> {
        find_business(self.ctx, business_id).await?;

        let is_favorite = self
            .ctx
            .favorite_repo()
            .toggle(user_id, business_id)
            .await?;

        info!(is_favorite, "Favorite toggled");
        Ok(FavoriteToggleResponse::new(is_favorite))
    }

    /// Public businesses the user has bookmarked
    #[instrument(skip(self))]
    pub async fn my_favorites(&self, user_id: i64) -> ServiceResult<Vec<BusinessResponse>> {
        let businesses = self
            .ctx
            .favorite_repo()
            .businesses_for_user(user_id)
            .await?;
        Ok(businesses.iter().map(BusinessResponse::from).collect())
    }
}
