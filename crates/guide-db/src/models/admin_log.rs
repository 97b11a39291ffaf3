//! Admin log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for admin_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AdminLogModel {
    pub id: i64,
    pub admin_user_id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
