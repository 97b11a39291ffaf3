//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use guide_core::entities::{BusinessPatch, BusinessStatusFilter, ReviewStatusFilter};
use guide_core::traits::{BusinessFilter, BusinessSort};
use guide_core::value_objects::GeoPoint;
use guide_core::DomainError;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Full name must be 2-100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub password: String,

    pub phone_number: Option<String>,

    /// Privacy policy and terms acceptance
    #[serde(default)]
    pub consent_accepted: bool,
}

/// Business owner self-registration; creates the account and a pending business
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterBusinessRequest {
    #[validate(length(min = 2, max = 200, message = "Business name must be 2-200 characters"))]
    pub business_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 30, message = "Phone is required"))]
    pub phone: String,

    #[validate(length(min = 1, max = 500, message = "Address is required"))]
    pub address: String,

    pub category_id: Option<i64>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub consent_accepted: bool,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Change password of the signed-in user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub new_password: String,
}

// ============================================================================
// Password Reset Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    pub user_id: i64,

    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordSmsRequest {
    #[validate(length(min = 1, max = 30, message = "Phone number is required"))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordSmsRequest {
    #[validate(length(min = 1, max = 30, message = "Phone number is required"))]
    pub phone_number: String,

    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,

    #[validate(length(min = 6, max = 100, message = "Password must be 6-100 characters"))]
    pub new_password: String,
}

// ============================================================================
// Business Requests
// ============================================================================

/// Public search query string
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BusinessSearchParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    pub price_range: Option<String>,
    pub sort_by: Option<String>,
}

impl BusinessSearchParams {
    /// Build a repository filter for one page
    pub fn into_filter(self, limit: i64, offset: i64) -> BusinessFilter {
        BusinessFilter {
            query: non_blank(self.query),
            category: non_blank(self.category),
            min_rating: self.min_rating.filter(|r| *r > 0.0),
            price_range: non_blank(self.price_range),
            sort: self
                .sort_by
                .as_deref()
                .map(BusinessSort::parse)
                .unwrap_or_default(),
            limit,
            offset,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Create business request, shared by users, owners and admins
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBusinessRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, max = 30, message = "Phone is required"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(url(message = "Invalid website URL"))]
    pub website: Option<String>,

    pub image_url: Option<String>,
    pub working_hours: Option<String>,
    pub price_range: Option<String>,
    pub category_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Honoured only for admins
    #[serde(default)]
    pub is_featured: bool,
}

impl CreateBusinessRequest {
    /// Coordinates must be given together and within range
    pub fn location(&self) -> Result<Option<GeoPoint>, DomainError> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

/// Partial business update
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateBusinessRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Address must be 1-500 characters"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 30, message = "Phone must be 1-30 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(url(message = "Invalid website URL"))]
    pub website: Option<String>,

    pub image_url: Option<String>,
    pub working_hours: Option<String>,
    pub price_range: Option<String>,
    pub category_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Admin only
    pub is_active: Option<bool>,
    /// Admin only
    pub is_featured: Option<bool>,
}

impl UpdateBusinessRequest {
    /// Convert into a domain patch, validating coordinates
    pub fn into_patch(self) -> Result<BusinessPatch, DomainError> {
        let location = GeoPoint::from_parts(self.latitude, self.longitude)?;
        Ok(BusinessPatch {
            name: self.name,
            description: self.description,
            address: self.address,
            phone: self.phone,
            email: self.email,
            website: self.website,
            image_url: self.image_url,
            working_hours: self.working_hours,
            price_range: self.price_range,
            category_id: self.category_id,
            location,
            is_active: self.is_active,
            is_featured: self.is_featured,
        })
    }
}

/// Admin business listing filter
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BusinessStatusQuery {
    #[serde(default)]
    pub status: BusinessStatusFilter,
}

/// Assign an owner to a business
#[derive(Debug, Clone, Deserialize)]
pub struct AssignOwnerRequest {
    pub owner_id: i64,
}

// ============================================================================
// Review Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub comment: String,
}

/// Admin review listing filter
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReviewStatusQuery {
    #[serde(default)]
    pub status: ReviewStatusFilter,
}

// ============================================================================
// Profile Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100, message = "Full name must be 2-100 characters"))]
    pub full_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: Option<String>,

    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 100, message = "Country must be at most 100 characters"))]
    pub country: Option<String>,

    #[validate(url(message = "Invalid website URL"))]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddPhotoRequest {
    #[validate(url(message = "Invalid photo URL"))]
    pub photo_url: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

// ============================================================================
// Category and News Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    pub image_url: Option<String>,
}

// ============================================================================
// Assistant, Contact and Admin Requests
// ============================================================================

/// AI assistant prompt with an optional approximate location
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "Prompt must be 1-2000 characters"))]
    pub prompt: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within -90..90"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within -180..180"))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogsQuery {
    pub limit: Option<i64>,
}
