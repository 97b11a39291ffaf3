//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AdminLog, Business, BusinessStatusFilter, Category, FavoriteFan, NewAdminLog, NewBusiness,
    NewCategory, NewNews, NewReview, NewUser, NewUserPhoto, News, Review, ReviewStatusFilter,
    User, UserPhoto,
};
use crate::error::DomainError;
use crate::value_objects::{PhoneNumber, Roles};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by normalized phone number
    async fn find_by_phone(&self, phone: &PhoneNumber) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Persist profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Set or clear the lockout end
    async fn set_lockout(&self, id: i64, until: Option<DateTime<Utc>>) -> RepoResult<()>;

    /// Replace the role set
    async fn set_roles(&self, id: i64, roles: Roles) -> RepoResult<()>;

    /// List users, newest first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>>;

    async fn count(&self) -> RepoResult<i64>;

    /// Count users holding the given role
    async fn count_with_role(&self, role: Roles) -> RepoResult<i64>;

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;
}

// ============================================================================
// Business Repository
// ============================================================================

/// Sort order for public business search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusinessSort {
    /// Featured first, then highest rated
    #[default]
    Featured,
    Rating,
    Reviews,
    Name,
    /// No origin is known server-side; ordered by name
    Distance,
}

impl BusinessSort {
    /// Parse a `sort_by` query value; unknown values fall back to the default
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Self::Rating,
            "reviews" => Self::Reviews,
            "name" => Self::Name,
            "distance" => Self::Distance,
            _ => Self::Featured,
        }
    }
}

/// Public search parameters
///
/// Results only ever include active and approved businesses.
#[derive(Debug, Clone, Default)]
pub struct BusinessFilter {
    /// Case-insensitive substring of name, description or address
    pub query: Option<String>,
    /// Category name, exact match
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    /// Exact match, e.g. "$$"
    pub price_range: Option<String>,
    pub sort: BusinessSort,
    pub limit: i64,
    pub offset: i64,
}

/// Number of businesses in a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category_id: i64,
    pub name: String,
    pub business_count: i64,
}

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Find business by ID regardless of approval state
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Business>>;

    /// Create a business; approval state follows its origin
    async fn create(&self, business: &NewBusiness) -> RepoResult<Business>;

    /// Persist editable fields, flags and owner of an existing business
    async fn update(&self, business: &Business) -> RepoResult<()>;

    /// Hard delete; reviews and favorites cascade
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Public search, paged
    async fn search(&self, filter: &BusinessFilter) -> RepoResult<Vec<Business>>;

    /// Total rows matching a search, ignoring paging
    async fn count_search(&self, filter: &BusinessFilter) -> RepoResult<i64>;

    /// Public featured businesses, highest rated first
    async fn featured(&self, limit: i64) -> RepoResult<Vec<Business>>;

    /// Public businesses with at least one review, highest rated first
    async fn top_rated(&self, limit: i64) -> RepoResult<Vec<Business>>;

    /// Public businesses in the same category, excluding the given one
    async fn similar(&self, business: &Business, limit: i64) -> RepoResult<Vec<Business>>;

    /// Public businesses that have coordinates
    async fn with_locations(&self) -> RepoResult<Vec<Business>>;

    /// Admin listing by approval state, newest first
    async fn list_by_status(
        &self,
        status: BusinessStatusFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Business>>;

    /// Businesses owned by a user, newest first
    async fn find_by_owner(&self, owner_id: i64) -> RepoResult<Vec<Business>>;

    /// Set or clear the owner
    async fn set_owner(&self, id: i64, owner_id: Option<i64>) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;

    /// Count businesses waiting for approval
    async fn count_pending(&self) -> RepoResult<i64>;

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;

    /// Categories with the most businesses
    async fn top_categories(&self, limit: i64) -> RepoResult<Vec<CategoryCount>>;
}

// ============================================================================
// Review Repository
// ============================================================================

/// Review persistence
///
/// Every write that can change which reviews are approved and active also
/// recomputes the business's `average_rating` and `total_reviews` inside the
/// same transaction.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find review by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Review>>;

    /// Check whether the user already reviewed the business
    async fn exists_for(&self, business_id: i64, user_id: i64) -> RepoResult<bool>;

    /// Approved and active reviews of a business, newest first
    async fn visible_for_business(&self, business_id: i64) -> RepoResult<Vec<Review>>;

    /// All reviews written by a user, newest first
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Review>>;

    /// Admin moderation listing, newest first
    async fn list_by_status(
        &self,
        status: ReviewStatusFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Review>>;

    /// Insert and refresh the business aggregate atomically
    ///
    /// Fails with [`DomainError::DuplicateReview`] when the pair already exists.
    async fn create_and_refresh_rating(&self, review: &NewReview) -> RepoResult<Review>;

    /// Delete and refresh the business aggregate atomically
    async fn delete_and_refresh_rating(&self, id: i64) -> RepoResult<()>;

    /// Change moderation flags and refresh the business aggregate atomically
    async fn set_status_and_refresh_rating(
        &self,
        id: i64,
        is_approved: bool,
        is_active: bool,
    ) -> RepoResult<Review>;

    async fn count(&self) -> RepoResult<i64>;

    /// Count reviews waiting for approval
    async fn count_pending(&self) -> RepoResult<i64>;

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name
    async fn list(&self) -> RepoResult<Vec<Category>>;

    /// Categories that have at least one public business
    async fn with_visible_businesses(&self) -> RepoResult<Vec<Category>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>>;

    async fn create(&self, category: &NewCategory) -> RepoResult<Category>;

    async fn update(&self, category: &Category) -> RepoResult<()>;

    /// Delete; businesses in the category lose their category
    async fn delete(&self, id: i64) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Flip the (user, business) bookmark; returns whether it now exists
    async fn toggle(&self, user_id: i64, business_id: i64) -> RepoResult<bool>;

    async fn exists(&self, user_id: i64, business_id: i64) -> RepoResult<bool>;

    /// Businesses bookmarked by a user, most recently added first
    async fn businesses_for_user(&self, user_id: i64) -> RepoResult<Vec<Business>>;

    /// Users who bookmarked a business, most recent first
    async fn fans_of(&self, business_id: i64) -> RepoResult<Vec<FavoriteFan>>;

    async fn count(&self) -> RepoResult<i64>;

    /// Bookmarks across all businesses owned by a user
    async fn count_for_owner(&self, owner_id: i64) -> RepoResult<i64>;
}

// ============================================================================
// News Repository
// ============================================================================

#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Articles, most recently published first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<News>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<News>>;

    /// Atomically bump the view counter and return the updated article
    async fn find_and_increment_views(&self, id: i64) -> RepoResult<Option<News>>;

    async fn create(&self, news: &NewNews) -> RepoResult<News>;

    async fn update(&self, news: &News) -> RepoResult<()>;

    async fn delete(&self, id: i64) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Admin Log Repository
// ============================================================================

#[async_trait]
pub trait AdminLogRepository: Send + Sync {
    /// Append an entry
    async fn append(&self, entry: &NewAdminLog) -> RepoResult<AdminLog>;

    /// Most recent entries first
    async fn latest(&self, limit: i64) -> RepoResult<Vec<AdminLog>>;
}

// ============================================================================
// User Photo Repository
// ============================================================================

#[async_trait]
pub trait UserPhotoRepository: Send + Sync {
    /// Active photos of a user, newest first
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<UserPhoto>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserPhoto>>;

    async fn create(&self, photo: &NewUserPhoto) -> RepoResult<UserPhoto>;

    async fn delete(&self, id: i64) -> RepoResult<()>;
}
