//! Category database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate row for category statistics
#[derive(Debug, Clone, FromRow)]
pub struct CategoryCountModel {
    pub category_id: i64,
    pub name: String,
    pub business_count: i64,
}
