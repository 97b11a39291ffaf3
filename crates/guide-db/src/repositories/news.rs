//! PostgreSQL implementation of NewsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guide_core::entities::{NewNews, News};
use guide_core::error::DomainError;
use guide_core::traits::{NewsRepository, RepoResult};

use crate::models::NewsModel;

use super::error::{map_db_error, map_foreign_key_violation};

const NEWS_COLUMNS: &str =
    "id, title, content, image_url, author_id, view_count, published_at, updated_at";

/// PostgreSQL implementation of NewsRepository
#[derive(Clone)]
pub struct PgNewsRepository {
    pool: PgPool,
}

impl PgNewsRepository {
    /// Create a new PgNewsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<News>> {
        let sql = format!(
            "SELECT {NEWS_COLUMNS} FROM news ORDER BY published_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        let models = sqlx::query_as::<_, NewsModel>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(models.into_iter().map(News::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<News>> {
        let sql = format!("SELECT {NEWS_COLUMNS} FROM news WHERE id = $1");
        let result = sqlx::query_as::<_, NewsModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(News::from))
    }

    #[instrument(skip(self))]
    async fn find_and_increment_views(&self, id: i64) -> RepoResult<Option<News>> {
        let sql = format!(
            "UPDATE news SET view_count = view_count + 1 WHERE id = $1 RETURNING {NEWS_COLUMNS}"
        );
        let result = sqlx::query_as::<_, NewsModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(News::from))
    }

    #[instrument(skip(self, news), fields(author_id = news.author_id))]
    async fn create(&self, news: &NewNews) -> RepoResult<News> {
        let sql = format!(
            r"
            INSERT INTO news (title, content, image_url, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {NEWS_COLUMNS}
            "
        );
        let model = sqlx::query_as::<_, NewsModel>(&sql)
            .bind(&news.title)
            .bind(&news.content)
            .bind(&news.image_url)
            .bind(news.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_foreign_key_violation(e, || DomainError::UserNotFound(news.author_id))
            })?;

        Ok(News::from(model))
    }

    #[instrument(skip(self, news), fields(news_id = news.id))]
    async fn update(&self, news: &News) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE news
            SET title = $2, content = $3, image_url = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(news.id)
        .bind(&news.title)
        .bind(&news.content)
        .bind(&news.image_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NewsNotFound(news.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NewsNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
