//! PostgreSQL implementation of FavoriteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use guide_core::entities::{Business, FavoriteFan};
use guide_core::error::DomainError;
use guide_core::traits::{FavoriteRepository, RepoResult};

use crate::models::{BusinessModel, FavoriteFanModel};

use super::business::BUSINESS_COLUMNS;
use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of FavoriteRepository
#[derive(Clone)]
pub struct PgFavoriteRepository {
    pool: PgPool,
}

impl PgFavoriteRepository {
    /// Create a new PgFavoriteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    /// Remove the pair if present, otherwise insert it; returns the new state
    #[instrument(skip(self))]
    async fn toggle(&self, user_id: i64, business_id: i64) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query(
            "DELETE FROM favorites WHERE user_id = $1 AND business_id = $2",
        )
        .bind(user_id)
        .bind(business_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        if removed == 0 {
            sqlx::query(
                r"
                INSERT INTO favorites (user_id, business_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(user_id)
            .bind(business_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                map_foreign_key_violation(e, || DomainError::BusinessNotFound(business_id))
            })?;
        }

        tx.commit().await.map_err(map_db_error)?;

        let is_favorite = removed == 0;
        debug!(user_id, business_id, is_favorite, "Favorite toggled");
        Ok(is_favorite)
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: i64, business_id: i64) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND business_id = $2)
            ",
        )
        .bind(user_id)
        .bind(business_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn businesses_for_user(&self, user_id: i64) -> RepoResult<Vec<Business>> {
        let sql = format!(
            r"
            SELECT {BUSINESS_COLUMNS}
            FROM favorites f
            JOIN businesses b ON b.id = f.business_id
            WHERE f.user_id = $1 AND b.is_active AND b.is_approved
            ORDER BY f.created_at DESC
            "
        );
        let models = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn fans_of(&self, business_id: i64) -> RepoResult<Vec<FavoriteFan>> {
        let models = sqlx::query_as::<_, FavoriteFanModel>(
            r"
            SELECT u.id AS user_id,
                   COALESCE(NULLIF(u.display_name, ''), NULLIF(u.full_name, ''),
                            SPLIT_PART(u.email, '@', 1)) AS name,
                   u.email,
                   f.created_at
            FROM favorites f
            JOIN users u ON u.id = f.user_id
            WHERE f.business_id = $1
            ORDER BY f.created_at DESC
            ",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(FavoriteFan::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorites")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_for_owner(&self, owner_id: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM favorites f
            JOIN businesses b ON b.id = f.business_id
            WHERE b.owner_id = $1
            ",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
