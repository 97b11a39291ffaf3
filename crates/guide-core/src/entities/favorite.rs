//! Favorite - a bookmark linking a user to a business

use chrono::{DateTime, Utc};

/// A (user, business) bookmark; the pair is unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub user_id: i64,
    pub business_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A user who bookmarked a business, as shown to the business owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteFan {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
