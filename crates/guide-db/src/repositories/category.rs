//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guide_core::entities::{Category, NewCategory};
use guide_core::error::DomainError;
use guide_core::traits::{CategoryRepository, RepoResult};

use crate::models::CategoryModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let models = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, name, description, icon, created_at
            FROM categories
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn with_visible_businesses(&self) -> RepoResult<Vec<Category>> {
        let models = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT c.id, c.name, c.description, c.icon, c.created_at
            FROM categories c
            WHERE EXISTS (
                SELECT 1 FROM businesses b
                WHERE b.category_id = c.id AND b.is_active AND b.is_approved
            )
            ORDER BY c.name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, name, description, icon, created_at
            FROM categories
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Category::from))
    }

    #[instrument(skip(self, category), fields(name = %category.name))]
    async fn create(&self, category: &NewCategory) -> RepoResult<Category> {
        let model = sqlx::query_as::<_, CategoryModel>(
            r"
            INSERT INTO categories (name, description, icon)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, icon, created_at
            ",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::CategoryNameExists))?;

        Ok(Category::from(model))
    }

    #[instrument(skip(self, category), fields(category_id = category.id))]
    async fn update(&self, category: &Category) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE categories SET name = $2, description = $3, icon = $4 WHERE id = $1
            ",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::CategoryNameExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(category.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
