//! Test fixtures and data generators
//!
//! Request bodies mirror the JSON the API accepts; response types only
//! carry the fields the tests read.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique suffix so repeated runs against one database never collide
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub consent_accepted: bool,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            full_name: format!("Test User {suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            phone_number: None,
            consent_accepted: true,
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Current user
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub roles: Vec<String>,
}

/// Create business request
#[derive(Debug, Serialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub price_range: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CreateBusinessRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Business {suffix}"),
            description: Some(format!("Integration fixture {suffix}")),
            address: "Ataturk Blv. 1, Alanya".to_string(),
            phone: "0242 513 00 00".to_string(),
            price_range: Some("$$".to_string()),
            latitude: Some(36.5444),
            longitude: Some(31.9954),
        }
    }
}

/// Business as returned by the API
#[derive(Debug, Deserialize)]
pub struct BusinessResponse {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub is_approved: bool,
    pub average_rating: f64,
    pub total_reviews: i32,
}

/// Business page
#[derive(Debug, Deserialize)]
pub struct BusinessDetailsResponse {
    pub business: BusinessResponse,
    pub reviews: Vec<ReviewResponse>,
    pub is_favorite: bool,
}

/// One page of search results
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<BusinessResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Create review request
#[derive(Debug, Serialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: String,
}

impl CreateReviewRequest {
    pub fn with_rating(rating: i32) -> Self {
        Self {
            rating,
            comment: format!("Rated {rating} by the integration suite"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub business_id: i64,
    pub rating: i16,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteToggleResponse {
    pub success: bool,
    pub is_favorite: bool,
}

#[derive(Debug, Deserialize)]
pub struct AdminLogResponse {
    pub id: i64,
    pub admin_user_id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MapConfigResponse {
    pub provider: String,
    pub google_api_key: Option<String>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
