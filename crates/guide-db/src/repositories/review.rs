//! PostgreSQL implementation of ReviewRepository
//!
//! Writes lock the parent business row, change the review and recompute the
//! cached rating aggregate before committing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use guide_core::entities::{NewReview, Review, ReviewStatusFilter};
use guide_core::error::DomainError;
use guide_core::traits::{RepoResult, ReviewRepository};

use crate::models::ReviewModel;

use super::error::{map_db_error, map_foreign_key_violation, map_unique_violation};

/// Review columns joined with author and business names; the statement must
/// alias reviews as `r`, users as `u` and businesses as `b`
const REVIEW_SELECT: &str = r"
    SELECT r.id, r.business_id, r.user_id, r.rating, r.comment, r.is_approved, r.is_active,
           r.created_at,
           COALESCE(NULLIF(u.display_name, ''), NULLIF(u.full_name, ''),
                    SPLIT_PART(u.email, '@', 1)) AS author_name,
           b.name AS business_name
    FROM reviews r
    JOIN users u ON u.id = r.user_id
    JOIN businesses b ON b.id = r.business_id
";

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the business row so concurrent review writes serialize
    async fn lock_business(tx: &mut Transaction<'_, Postgres>, business_id: i64) -> RepoResult<()> {
        let locked = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM businesses WHERE id = $1 FOR UPDATE",
        )
        .bind(business_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if locked.is_none() {
            return Err(DomainError::BusinessNotFound(business_id));
        }

        Ok(())
    }

    /// Recompute `average_rating` and `total_reviews` from approved, active reviews
    async fn refresh_rating(
        tx: &mut Transaction<'_, Postgres>,
        business_id: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE businesses b
            SET average_rating = s.avg, total_reviews = s.cnt
            FROM (
                SELECT COALESCE(AVG(rating)::FLOAT8, 0) AS avg, COUNT(*)::INT AS cnt
                FROM reviews
                WHERE business_id = $1 AND is_approved AND is_active
            ) s
            WHERE b.id = $1
            ",
        )
        .bind(business_id)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        debug!(business_id, "Rating aggregate refreshed");
        Ok(())
    }

    async fn fetch_one(tx: &mut Transaction<'_, Postgres>, id: i64) -> RepoResult<Review> {
        let sql = format!("{REVIEW_SELECT} WHERE r.id = $1");
        let model = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(id)
            .fetch_one(&mut **tx)
            .await
            .map_err(map_db_error)?;

        Ok(Review::from(model))
    }

    async fn business_of(&self, id: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT business_id FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .ok_or(DomainError::ReviewNotFound(id))
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Review>> {
        let sql = format!("{REVIEW_SELECT} WHERE r.id = $1");
        let result = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Review::from))
    }

    #[instrument(skip(self))]
    async fn exists_for(&self, business_id: i64, user_id: i64) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM reviews WHERE business_id = $1 AND user_id = $2)
            ",
        )
        .bind(business_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn visible_for_business(&self, business_id: i64) -> RepoResult<Vec<Review>> {
        let sql = format!(
            "{REVIEW_SELECT} WHERE r.business_id = $1 AND r.is_approved AND r.is_active \
             ORDER BY r.created_at DESC, r.id DESC"
        );
        let models = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(business_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Review>> {
        let sql =
            format!("{REVIEW_SELECT} WHERE r.user_id = $1 ORDER BY r.created_at DESC, r.id DESC");
        let models = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_status(
        &self,
        status: ReviewStatusFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Review>> {
        let predicate = match status {
            ReviewStatusFilter::Pending => "NOT r.is_approved",
            ReviewStatusFilter::All => "TRUE",
        };
        let sql = format!(
            "{REVIEW_SELECT} WHERE {predicate} ORDER BY r.created_at DESC, r.id DESC \
             LIMIT $1 OFFSET $2"
        );
        let models = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Review::from).collect())
    }

    #[instrument(
        skip(self, review),
        fields(business_id = review.business_id, user_id = review.user_id)
    )]
    async fn create_and_refresh_rating(&self, review: &NewReview) -> RepoResult<Review> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_business(&mut tx, review.business_id).await?;

        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO reviews (business_id, user_id, rating, comment, is_approved, is_active)
            VALUES ($1, $2, $3, $4, TRUE, TRUE)
            RETURNING id
            ",
        )
        .bind(review.business_id)
        .bind(review.user_id)
        .bind(review.rating.value())
        .bind(&review.comment)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                map_foreign_key_violation(e, || DomainError::UserNotFound(review.user_id))
            } else {
                map_unique_violation(e, || DomainError::DuplicateReview)
            }
        })?;

        Self::refresh_rating(&mut tx, review.business_id).await?;
        let created = Self::fetch_one(&mut tx, id).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn delete_and_refresh_rating(&self, id: i64) -> RepoResult<()> {
        let business_id = self.business_of(id).await?;
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_business(&mut tx, business_id).await?;

        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReviewNotFound(id));
        }

        Self::refresh_rating(&mut tx, business_id).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_status_and_refresh_rating(
        &self,
        id: i64,
        is_approved: bool,
        is_active: bool,
    ) -> RepoResult<Review> {
        let business_id = self.business_of(id).await?;
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_business(&mut tx, business_id).await?;

        let result = sqlx::query(
            "UPDATE reviews SET is_approved = $2, is_active = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(is_approved)
        .bind(is_active)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReviewNotFound(id));
        }

        Self::refresh_rating(&mut tx, business_id).await?;
        let updated = Self::fetch_one(&mut tx, id).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_pending(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE NOT is_approved")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
