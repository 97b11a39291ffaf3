//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Page of results with totals
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: i64) -> Self {
        let per_page_i = i64::from(per_page.max(1));
        Self {
            data,
            pagination: PaginationMeta {
                page,
                per_page,
                total,
                total_pages: (total + per_page_i - 1) / per_page_i,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: i64,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Business owner registration result
#[derive(Debug, Serialize)]
pub struct BusinessRegistrationResponse {
    #[serde(flatten)]
    pub auth: AuthResponse,
    pub business: BusinessResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Signed-in user's own profile
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub roles: Vec<&'static str>,
    pub created_at: DateTime<Utc>,
}

/// User row in the admin listing
#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryResponse {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub roles: Vec<&'static str>,
    pub is_active: bool,
    pub is_locked_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockout_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPhotoResponse {
    pub id: i64,
    pub photo_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Directory Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BusinessResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    pub is_active: bool,
    pub is_approved: bool,
    pub is_featured: bool,
    pub average_rating: f64,
    pub total_reviews: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub business_id: i64,
    pub user_id: i64,
    pub rating: i16,
    pub comment: String,
    pub is_approved: bool,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything shown on a business page
#[derive(Debug, Serialize)]
pub struct BusinessDetailsResponse {
    pub business: BusinessResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub similar: Vec<BusinessResponse>,
    pub is_favorite: bool,
}

/// A pin on the map
#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub average_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured: Vec<BusinessResponse>,
    pub top_rated: Vec<BusinessResponse>,
    pub categories: Vec<CategoryResponse>,
    pub latest_news: Vec<NewsResponse>,
}

/// Map provider settings and the client retry policy
#[derive(Debug, Clone, Serialize)]
pub struct MapConfigResponse {
    /// `google` or `osm`
    pub provider: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub load_timeout_ms: u64,
    pub osm_tile_url: &'static str,
    pub nominatim_url: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author_id: i64,
    pub view_count: i64,
    pub published_at: DateTime<Utc>,
}

// ============================================================================
// Favorites
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteToggleResponse {
    pub success: bool,
    pub is_favorite: bool,
    pub message: String,
}

impl FavoriteToggleResponse {
    pub fn new(is_favorite: bool) -> Self {
        let message = if is_favorite {
            "Added to favorites"
        } else {
            "Removed from favorites"
        };
        Self {
            success: true,
            is_favorite,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteFanResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Owner and Admin Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OwnerDashboardResponse {
    pub total_businesses: i64,
    pub approved_businesses: i64,
    pub pending_businesses: i64,
    pub total_reviews: i64,
    /// Mean over businesses that have at least one review
    pub average_rating: f64,
    pub total_favorites: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCountResponse {
    pub category_id: i64,
    pub name: String,
    pub business_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminStatsResponse {
    pub total_businesses: i64,
    pub total_users: i64,
    pub total_reviews: i64,
    pub total_categories: i64,
    pub total_favorites: i64,
    pub total_business_owners: i64,
    pub pending_businesses: i64,
    pub pending_reviews: i64,
    pub new_businesses_last_7_days: i64,
    pub new_users_last_7_days: i64,
    pub new_reviews_last_7_days: i64,
    pub top_categories: Vec<CategoryCountResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminLogResponse {
    pub id: i64,
    pub admin_user_id: i64,
    pub action: &'static str,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Assistant
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

/// Individual dependency checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: String,
    /// Absent when Redis is not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<String>,
}

impl ReadinessResponse {
    pub fn ready(db_ok: bool, redis_ok: Option<bool>) -> Self {
        let label = |ok: bool| (if ok { "healthy" } else { "unhealthy" }).to_string();
        let all_ok = db_ok && redis_ok.unwrap_or(true);
        Self {
            status: (if all_ok { "ready" } else { "not_ready" }).to_string(),
            checks: HealthChecks {
                database: label(db_ok),
                redis: redis_ok.map(label),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
