//! Review service
//!
//! One review per user and business. Every write recomputes the business
//! rating in the same transaction as the change itself.

use tracing::{info, instrument};

use guide_core::entities::{AdminAction, NewReview};
use guide_core::DomainError;

use crate::dto::{CreateReviewRequest, ReviewResponse};

use super::access::{find_business, load_actor};
use super::audit::AuditLogger;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a review to a public business
    #[instrument(skip(self, request))]
    pub async fn add_review(
        &self,
        user_id: i64,
        business_id: i64,
        request: CreateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        let review = NewReview::new(business_id, user_id, request.rating, &request.comment)?;

        let business = find_business(self.ctx, business_id).await?;
        if !business.is_publicly_visible() {
            return Err(DomainError::BusinessNotVisible.into());
        }

        if self
            .ctx
            .review_repo()
            .exists_for(business_id, user_id)
            .await?
        {
            return Err(DomainError::DuplicateReview.into());
        }

        let created = self
            .ctx
            .review_repo()
            .create_and_refresh_rating(&review)
            .await?;

        info!(review_id = created.id, rating = %created.rating, "Review added");
        Ok(ReviewResponse::from(created))
    }

    /// Delete a review; allowed for its author and for admins
    #[instrument(skip(self))]
    pub async fn delete_review(&self, user_id: i64, review_id: i64) -> ServiceResult<()> {
        let actor = load_actor(self.ctx, user_id).await?;
        let review = self
            .ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        let is_author = review.user_id == actor.id;
        if !is_author && !actor.is_admin() {
            return Err(DomainError::NotReviewAuthor.into());
        }

        self.ctx
            .review_repo()
            .delete_and_refresh_rating(review_id)
            .await?;

        if !is_author {
            AuditLogger::new(self.ctx)
                .record(
                    actor.id,
                    AdminAction::Delete,
                    "Review",
                    review_id,
                    format!("Deleted review {review_id} on business {}", review.business_id),
                )
                .await;
        }

        info!(review_id, "Review deleted");
        Ok(())
    }

    /// Reviews written by a user, newest first
    #[instrument(skip(self))]
    pub async fn my_reviews(&self, user_id: i64) -> ServiceResult<Vec<ReviewResponse>> {
        let reviews = self.ctx.review_repo().find_by_user(user_id).await?;
        Ok(reviews.into_iter().map(ReviewResponse::from).collect())
    }
}
