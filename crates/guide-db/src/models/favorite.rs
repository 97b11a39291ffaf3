//! Favorite database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Favorite joined with the bookmarking user
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteFanModel {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
