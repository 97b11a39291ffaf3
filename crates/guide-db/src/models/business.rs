//! Business database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for businesses table
#[derive(Debug, Clone, FromRow)]
pub struct BusinessModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub working_hours: Option<String>,
    pub price_range: Option<String>,
    pub category_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub created_by: Option<i64>,
    pub is_active: bool,
    pub is_approved: bool,
    pub is_featured: bool,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
