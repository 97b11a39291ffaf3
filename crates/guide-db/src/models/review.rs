//! Review database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Review row joined with its author's display name and the business name
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: i64,
    pub business_id: i64,
    pub user_id: i64,
    pub rating: i16,
    pub comment: String,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub business_name: Option<String>,
}
