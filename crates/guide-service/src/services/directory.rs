//! Public directory: home page, search, business details, categories and map
//!
//! Only active and approved businesses are listed. A business that is not
//! public can still be opened by its owner or an admin.

use tracing::{debug, instrument};

use guide_core::entities::Business;
use guide_core::DomainError;

use crate::dto::{
    BusinessDetailsResponse, BusinessResponse, BusinessSearchParams, CategoryResponse,
    HomeResponse, LocationResponse, MapConfigResponse, NewsResponse, PaginatedResponse,
    ReviewResponse,
};

use super::access::find_business;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const HOME_FEATURED: i64 = 6;
const HOME_TOP_RATED: i64 = 6;
const HOME_NEWS: i64 = 3;
const SIMILAR_LIMIT: i64 = 6;

/// Map loading policy handed to clients
const MAP_MAX_RETRIES: u32 = 3;
const MAP_RETRY_DELAY_MS: u64 = 2_000;
const MAP_LOAD_TIMEOUT_MS: u64 = 10_000;
const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Public directory service
pub struct DirectoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DirectoryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Featured and top rated businesses, categories and the latest news
    #[instrument(skip(self))]
    pub async fn home(&self) -> ServiceResult<HomeResponse> {
        let featured = self.ctx.business_repo().featured(HOME_FEATURED).await?;
        let top_rated = self.ctx.business_repo().top_rated(HOME_TOP_RATED).await?;
        let categories = self.ctx.category_repo().list().await?;
        let news = self.ctx.news_repo().list(HOME_NEWS, 0).await?;

        Ok(HomeResponse {
            featured: featured.iter().map(BusinessResponse::from).collect(),
            top_rated: top_rated.iter().map(BusinessResponse::from).collect(),
            categories: categories.iter().map(CategoryResponse::from).collect(),
            latest_news: news.iter().map(NewsResponse::from).collect(),
        })
    }

    /// Search public businesses, one page at a time
    #[instrument(skip(self, params))]
    pub async fn search(
        &self,
        params: BusinessSearchParams,
        page: u32,
        per_page: u32,
    ) -> ServiceResult<PaginatedResponse<BusinessResponse>> {
        let page = page.max(1);
        let limit = i64::from(per_page);
        let offset = i64::from(page - 1) * limit;
        let filter = params.into_filter(limit, offset);

        let businesses = self.ctx.business_repo().search(&filter).await?;
        let total = self.ctx.business_repo().count_search(&filter).await?;
        debug!(total, returned = businesses.len(), "Business search");

        Ok(PaginatedResponse::new(
            businesses.iter().map(BusinessResponse::from).collect(),
            page,
            per_page,
            total,
        ))
    }

    /// Business page: the business, its category, visible reviews and similar businesses
    #[instrument(skip(self))]
    pub async fn business_details(
        &self,
        id: i64,
        viewer_id: Option<i64>,
    ) -> ServiceResult<BusinessDetailsResponse> {
        let business = find_business(self.ctx, id).await?;

        if !business.is_publicly_visible() && !self.can_see_hidden(&business, viewer_id).await? {
            return Err(DomainError::BusinessNotFound(id).into());
        }

        let category = match business.category_id {
            Some(category_id) => self.ctx.category_repo().find_by_id(category_id).await?,
            None => None,
        };
        let reviews = self.ctx.review_repo().visible_for_business(id).await?;
        let similar = self
            .ctx
            .business_repo()
            .similar(&business, SIMILAR_LIMIT)
            .await?;
        let is_favorite = match viewer_id {
            Some(user_id) => self.ctx.favorite_repo().exists(user_id, id).await?,
            None => false,
        };

        Ok(BusinessDetailsResponse {
            business: BusinessResponse::from(&business),
            category: category.as_ref().map(CategoryResponse::from),
            reviews: reviews.iter().map(ReviewResponse::from).collect(),
            similar: similar.iter().map(BusinessResponse::from).collect(),
            is_favorite,
        })
    }

    /// Map pins for public businesses with coordinates
    #[instrument(skip(self))]
    pub async fn locations(&self) -> ServiceResult<Vec<LocationResponse>> {
        let businesses = self.ctx.business_repo().with_locations().await?;
        Ok(businesses
            .iter()
            .filter_map(LocationResponse::from_business)
            .collect())
    }

    pub async fn categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().list().await?;
        Ok(categories.iter().map(CategoryResponse::from).collect())
    }

    pub async fn category(&self, id: i64) -> ServiceResult<CategoryResponse> {
        self.ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .map(CategoryResponse::from)
            .ok_or_else(|| ServiceError::not_found("Category", id))
    }

    /// Map provider and retry policy; Google when a key is configured, otherwise OSM
    pub fn map_config(&self) -> MapConfigResponse {
        let google_api_key = self.ctx.settings().google_maps_api_key.clone();
        MapConfigResponse {
            provider: if google_api_key.is_some() { "google" } else { "osm" },
            google_api_key,
            max_retries: MAP_MAX_RETRIES,
            retry_delay_ms: MAP_RETRY_DELAY_MS,
            load_timeout_ms: MAP_LOAD_TIMEOUT_MS,
            osm_tile_url: OSM_TILE_URL,
            nominatim_url: NOMINATIM_URL,
        }
    }

    async fn can_see_hidden(
        &self,
        business: &Business,
        viewer_id: Option<i64>,
    ) -> ServiceResult<bool> {
        let Some(viewer_id) = viewer_id else {
            return Ok(false);
        };
        if business.is_owned_by(viewer_id) {
            return Ok(true);
        }
        let viewer = self.ctx.user_repo().find_by_id(viewer_id).await?;
        Ok(viewer.is_some_and(|u| u.is_admin()))
    }
}
