//! Businesses submitted by signed-in users
//!
//! Submissions start pending and appear publicly only after admin approval.

use tracing::{info, instrument};
use validator::Validate;

use guide_core::entities::{BusinessOrigin, NewBusiness};

use crate::dto::{BusinessResponse, CreateBusinessRequest};

use super::access::{ensure_category, load_actor};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Build an insert from a create request
///
/// `is_featured` is only kept for admin-created businesses.
pub(crate) fn new_business(
    request: CreateBusinessRequest,
    origin: BusinessOrigin,
    owner_id: Option<i64>,
    created_by: i64,
) -> ServiceResult<NewBusiness> {
    request
        .validate()
        .map_err(|e| ServiceError::validation(e.to_string()))?;
    let location = request.location()?;

    Ok(NewBusiness {
        name: request.name.trim().to_string(),
        description: request.description,
        address: request.address.trim().to_string(),
        phone: request.phone.trim().to_string(),
        email: request.email,
        website: request.website,
        image_url: request.image_url,
        working_hours: request.working_hours,
        price_range: request.price_range,
        category_id: request.category_id,
        owner_id,
        created_by: Some(created_by),
        is_featured: matches!(origin, BusinessOrigin::Admin) && request.is_featured,
        location,
        origin,
    })
}

pub struct BusinessSubmissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BusinessSubmissionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a business for review
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn submit(
        &self,
        user_id: i64,
        request: CreateBusinessRequest,
    ) -> ServiceResult<BusinessResponse> {
        load_actor(self.ctx, user_id).await?;
        ensure_category(self.ctx, request.category_id).await?;

        let new = new_business(request, BusinessOrigin::User, None, user_id)?;
        let business = self.ctx.business_repo().create(&new).await?;

        info!(business_id = business.id, "Business submitted for approval");
        Ok(BusinessResponse::from(business))
    }
}
