//! PostgreSQL implementation of BusinessRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use guide_core::entities::{Business, BusinessStatusFilter, NewBusiness};
use guide_core::error::DomainError;
use guide_core::traits::{
    BusinessFilter, BusinessRepository, BusinessSort, CategoryCount, RepoResult,
};

use crate::models::{BusinessModel, CategoryCountModel};

use super::error::{like_pattern, map_db_error, map_foreign_key_violation};

/// Columns of the `businesses` table, qualified with the `b` alias
pub(crate) const BUSINESS_COLUMNS: &str = "b.id, b.name, b.description, b.address, b.phone, \
     b.email, b.website, b.image_url, b.working_hours, b.price_range, b.category_id, b.owner_id, \
     b.created_by, b.is_active, b.is_approved, b.is_featured, b.average_rating, b.total_reviews, \
     b.latitude, b.longitude, b.created_at, b.updated_at";

/// Predicate for businesses shown on public surfaces
const PUBLIC: &str = "b.is_active AND b.is_approved";

/// Shared filter for search and its count; parameters $1..$4
const SEARCH_FILTER: &str = r"
    ($1::TEXT IS NULL OR b.name ILIKE $1 OR b.description ILIKE $1 OR b.address ILIKE $1)
    AND ($2::TEXT IS NULL OR c.name = $2)
    AND ($3::FLOAT8 IS NULL OR b.average_rating >= $3)
    AND ($4::TEXT IS NULL OR b.price_range = $4)
";

fn order_clause(sort: BusinessSort) -> &'static str {
    match sort {
        BusinessSort::Featured => "b.is_featured DESC, b.average_rating DESC, b.id DESC",
        BusinessSort::Rating => "b.average_rating DESC, b.total_reviews DESC, b.id DESC",
        BusinessSort::Reviews => "b.total_reviews DESC, b.average_rating DESC, b.id DESC",
        BusinessSort::Name | BusinessSort::Distance => "b.name ASC, b.id ASC",
    }
}

fn status_clause(status: BusinessStatusFilter) -> &'static str {
    match status {
        BusinessStatusFilter::Pending => "NOT b.is_approved",
        BusinessStatusFilter::Approved => "b.is_approved",
        BusinessStatusFilter::All => "TRUE",
    }
}

/// PostgreSQL implementation of BusinessRepository
#[derive(Clone)]
pub struct PgBusinessRepository {
    pool: PgPool,
}

impl PgBusinessRepository {
    /// Create a new PgBusinessRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_list(&self, sql: &str, limit: i64) -> RepoResult<Vec<Business>> {
        let models = sqlx::query_as::<_, BusinessModel>(sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Business::from).collect())
    }

    async fn count_where(&self, predicate: &str) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM businesses b WHERE {predicate}");
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl BusinessRepository for PgBusinessRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Business>> {
        let sql = format!("SELECT {BUSINESS_COLUMNS} FROM businesses b WHERE b.id = $1");
        let result = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Business::from))
    }

    #[instrument(skip(self, business), fields(name = %business.name, origin = ?business.origin))]
    async fn create(&self, business: &NewBusiness) -> RepoResult<Business> {
        let sql = format!(
            r"
            INSERT INTO businesses AS b (name, description, address, phone, email, website,
                image_url, working_hours, price_range, category_id, owner_id, created_by,
                is_active, is_approved, is_featured, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, TRUE, $13, $14, $15, $16)
            RETURNING {BUSINESS_COLUMNS}
            "
        );
        let model = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(&business.name)
            .bind(&business.description)
            .bind(&business.address)
            .bind(&business.phone)
            .bind(&business.email)
            .bind(&business.website)
            .bind(&business.image_url)
            .bind(&business.working_hours)
            .bind(&business.price_range)
            .bind(business.category_id)
            .bind(business.owner_id)
            .bind(business.created_by)
            .bind(business.is_approved())
            .bind(business.is_featured)
            .bind(business.location.map(|p| p.latitude))
            .bind(business.location.map(|p| p.longitude))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_foreign_key_violation(e, || {
                    DomainError::ValidationError(
                        "Unknown category, owner or creator".to_string(),
                    )
                })
            })?;

        Ok(Business::from(model))
    }

    #[instrument(skip(self, business), fields(business_id = business.id))]
    async fn update(&self, business: &Business) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE businesses
            SET name = $2, description = $3, address = $4, phone = $5, email = $6,
                website = $7, image_url = $8, working_hours = $9, price_range = $10,
                category_id = $11, owner_id = $12, is_active = $13, is_approved = $14,
                is_featured = $15, latitude = $16, longitude = $17, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(business.id)
        .bind(&business.name)
        .bind(&business.description)
        .bind(&business.address)
        .bind(&business.phone)
        .bind(&business.email)
        .bind(&business.website)
        .bind(&business.image_url)
        .bind(&business.working_hours)
        .bind(&business.price_range)
        .bind(business.category_id)
        .bind(business.owner_id)
        .bind(business.is_active)
        .bind(business.is_approved)
        .bind(business.is_featured)
        .bind(business.location.map(|p| p.latitude))
        .bind(business.location.map(|p| p.longitude))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || {
                DomainError::ValidationError("Unknown category or owner".to_string())
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BusinessNotFound(business.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM businesses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BusinessNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, filter: &BusinessFilter) -> RepoResult<Vec<Business>> {
        let sql = format!(
            r"
            SELECT {BUSINESS_COLUMNS}
            FROM businesses b
            LEFT JOIN categories c ON c.id = b.category_id
            WHERE {PUBLIC} AND {SEARCH_FILTER}
            ORDER BY {order}
            LIMIT $5 OFFSET $6
            ",
            order = order_clause(filter.sort),
        );
        let models = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(filter.query.as_deref().map(like_pattern))
            .bind(&filter.category)
            .bind(filter.min_rating)
            .bind(&filter.price_range)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_search(&self, filter: &BusinessFilter) -> RepoResult<i64> {
        let sql = format!(
            r"
            SELECT COUNT(*)
            FROM businesses b
            LEFT JOIN categories c ON c.id = b.category_id
            WHERE {PUBLIC} AND {SEARCH_FILTER}
            "
        );
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.query.as_deref().map(like_pattern))
            .bind(&filter.category)
            .bind(filter.min_rating)
            .bind(&filter.price_range)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn featured(&self, limit: i64) -> RepoResult<Vec<Business>> {
        let sql = format!(
            r"
            SELECT {BUSINESS_COLUMNS} FROM businesses b
            WHERE {PUBLIC} AND b.is_featured
            ORDER BY b.average_rating DESC, b.id DESC
            LIMIT $1
            "
        );
        self.fetch_list(&sql, limit).await
    }

    #[instrument(skip(self))]
    async fn top_rated(&self, limit: i64) -> RepoResult<Vec<Business>> {
        let sql = format!(
            r"
            SELECT {BUSINESS_COLUMNS} FROM businesses b
            WHERE {PUBLIC} AND b.total_reviews > 0
            ORDER BY b.average_rating DESC, b.total_reviews DESC, b.id DESC
            LIMIT $1
            "
        );
        self.fetch_list(&sql, limit).await
    }

    #[instrument(skip(self, business), fields(business_id = business.id))]
    async fn similar(&self, business: &Business, limit: i64) -> RepoResult<Vec<Business>> {
        let Some(category_id) = business.category_id else {
            return Ok(Vec::new());
        };

        let sql = format!(
            r"
            SELECT {BUSINESS_COLUMNS} FROM businesses b
            WHERE {PUBLIC} AND b.category_id = $1 AND b.id <> $2
            ORDER BY b.is_featured DESC, b.average_rating DESC, b.created_at DESC
            LIMIT $3
            "
        );
        let models = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(category_id)
            .bind(business.id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn with_locations(&self) -> RepoResult<Vec<Business>> {
        let sql = format!(
            r"
            SELECT {BUSINESS_COLUMNS} FROM businesses b
            WHERE {PUBLIC} AND b.latitude IS NOT NULL AND b.longitude IS NOT NULL
            ORDER BY b.name
            "
        );
        let models = sqlx::query_as::<_, BusinessModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_status(
        &self,
        status: BusinessStatusFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Business>> {
        let sql = format!(
            r"
            SELECT {BUSINESS_COLUMNS} FROM businesses b
            WHERE {status}
            ORDER BY b.created_at DESC, b.id DESC
            LIMIT $1 OFFSET $2
            ",
            status = status_clause(status),
        );
        let models = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: i64) -> RepoResult<Vec<Business>> {
        let sql = format!(
            r"
            SELECT {BUSINESS_COLUMNS} FROM businesses b
            WHERE b.owner_id = $1
            ORDER BY b.created_at DESC, b.id DESC
            "
        );
        let models = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn set_owner(&self, id: i64, owner_id: Option<i64>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE businesses SET owner_id = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || {
                DomainError::UserNotFound(owner_id.unwrap_or_default())
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BusinessNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        self.count_where("TRUE").await
    }

    #[instrument(skip(self))]
    async fn count_pending(&self) -> RepoResult<i64> {
        self.count_where("NOT b.is_approved").await
    }

    #[instrument(skip(self))]
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM businesses WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn top_categories(&self, limit: i64) -> RepoResult<Vec<CategoryCount>> {
        let models = sqlx::query_as::<_, CategoryCountModel>(
            r"
            SELECT c.id AS category_id, c.name, COUNT(b.id) AS business_count
            FROM categories c
            LEFT JOIN businesses b ON b.category_id = c.id
            GROUP BY c.id, c.name
            ORDER BY business_count DESC, c.name ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(CategoryCount::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgBusinessRepository>();
    }

    #[test]
    fn test_distance_sort_falls_back_to_name() {
        assert_eq!(
            order_clause(BusinessSort::Distance),
            order_clause(BusinessSort::Name)
        );
        assert!(order_clause(BusinessSort::Featured).starts_with("b.is_featured DESC"));
    }

    #[test]
    fn test_status_clause() {
        assert_eq!(status_clause(BusinessStatusFilter::Pending), "NOT b.is_approved");
        assert_eq!(status_clause(BusinessStatusFilter::All), "TRUE");
    }
}
