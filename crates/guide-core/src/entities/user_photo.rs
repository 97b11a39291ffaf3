//! User photo gallery entries

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPhoto {
    pub id: i64,
    pub user_id: i64,
    pub photo_url: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUserPhoto {
    pub user_id: i64,
    pub photo_url: String,
    pub description: Option<String>,
}
