//! PostgreSQL implementation of UserPhotoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guide_core::entities::{NewUserPhoto, UserPhoto};
use guide_core::error::DomainError;
use guide_core::traits::{RepoResult, UserPhotoRepository};

use crate::models::UserPhotoModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of UserPhotoRepository
#[derive(Clone)]
pub struct PgUserPhotoRepository {
    pool: PgPool,
}

impl PgUserPhotoRepository {
    /// Create a new PgUserPhotoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserPhotoRepository for PgUserPhotoRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<UserPhoto>> {
        let models = sqlx::query_as::<_, UserPhotoModel>(
            r"
            SELECT id, user_id, photo_url, description, is_active, created_at
            FROM user_photos
            WHERE user_id = $1 AND is_active
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(UserPhoto::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserPhoto>> {
        let result = sqlx::query_as::<_, UserPhotoModel>(
            r"
            SELECT id, user_id, photo_url, description, is_active, created_at
            FROM user_photos
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserPhoto::from))
    }

    #[instrument(skip(self, photo), fields(user_id = photo.user_id))]
    async fn create(&self, photo: &NewUserPhoto) -> RepoResult<UserPhoto> {
        let model = sqlx::query_as::<_, UserPhotoModel>(
            r"
            INSERT INTO user_photos (user_id, photo_url, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, photo_url, description, is_active, created_at
            ",
        )
        .bind(photo.user_id)
        .bind(&photo.photo_url)
        .bind(&photo.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(photo.user_id)))?;

        Ok(UserPhoto::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM user_photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PhotoNotFound(id));
        }

        Ok(())
    }
}
