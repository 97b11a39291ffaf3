//! PostgreSQL implementation of AdminLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use guide_core::entities::{AdminLog, NewAdminLog};
use guide_core::traits::{AdminLogRepository, RepoResult};

use crate::models::AdminLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AdminLogRepository
///
/// The table is append-only; there is no update or delete.
#[derive(Clone)]
pub struct PgAdminLogRepository {
    pool: PgPool,
}

impl PgAdminLogRepository {
    /// Create a new PgAdminLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminLogRepository for PgAdminLogRepository {
    #[instrument(skip(self, entry), fields(action = %entry.action, entity = entry.entity_type))]
    async fn append(&self, entry: &NewAdminLog) -> RepoResult<AdminLog> {
        let model = sqlx::query_as::<_, AdminLogModel>(
            r"
            INSERT INTO admin_logs (admin_user_id, action, entity_type, entity_id, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, admin_user_id, action, entity_type, entity_id, description, created_at
            ",
        )
        .bind(entry.admin_user_id)
        .bind(entry.action.as_str())
        .bind(entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        AdminLog::try_from(model)
    }

    #[instrument(skip(self))]
    async fn latest(&self, limit: i64) -> RepoResult<Vec<AdminLog>> {
        let models = sqlx::query_as::<_, AdminLogModel>(
            r"
            SELECT id, admin_user_id, action, entity_type, entity_id, description, created_at
            FROM admin_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(AdminLog::try_from).collect()
    }
}
