//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Business not found: {0}")]
    BusinessNotFound(i64),

    #[error("Review not found: {0}")]
    ReviewNotFound(i64),

    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("News article not found: {0}")]
    NewsNotFound(i64),

    #[error("Photo not found: {0}")]
    PhotoNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),

    #[error("Review comment must not be empty")]
    EmptyComment,

    #[error("Invalid phone number")]
    InvalidPhoneNumber,

    #[error("Latitude and longitude must be given together and within range")]
    InvalidCoordinates,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Consent must be accepted")]
    ConsentRequired,

    #[error("Invalid or expired reset code")]
    InvalidResetCode,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing role: {0}")]
    MissingRole(&'static str),

    #[error("Not the owner of this business")]
    NotBusinessOwner,

    #[error("Not the author of this review")]
    NotReviewAuthor,

    #[error("Account is locked")]
    AccountLocked,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("You have already reviewed this business")]
    DuplicateReview,

    #[error("Category name already exists")]
    CategoryNameExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Business is not open for reviews")]
    BusinessNotVisible,

    #[error("Assigned user does not hold the BusinessOwner role")]
    NotABusinessOwner,

    #[error("Administrators cannot ban themselves")]
    CannotBanSelf,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::BusinessNotFound(_) => "UNKNOWN_BUSINESS",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::NewsNotFound(_) => "UNKNOWN_NEWS",
            Self::PhotoNotFound(_) => "UNKNOWN_PHOTO",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::EmptyComment => "EMPTY_COMMENT",
            Self::InvalidPhoneNumber => "INVALID_PHONE_NUMBER",
            Self::InvalidCoordinates => "INVALID_COORDINATES",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ConsentRequired => "CONSENT_REQUIRED",
            Self::InvalidResetCode => "INVALID_RESET_CODE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::MissingRole(_) => "MISSING_ROLE",
            Self::NotBusinessOwner => "NOT_BUSINESS_OWNER",
            Self::NotReviewAuthor => "NOT_REVIEW_AUTHOR",
            Self::AccountLocked => "ACCOUNT_LOCKED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::DuplicateReview => "DUPLICATE_REVIEW",
            Self::CategoryNameExists => "CATEGORY_NAME_EXISTS",

            // Business Rules
            Self::BusinessNotVisible => "BUSINESS_NOT_VISIBLE",
            Self::NotABusinessOwner => "NOT_A_BUSINESS_OWNER",
            Self::CannotBanSelf => "CANNOT_BAN_SELF",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::BusinessNotFound(_)
                | Self::ReviewNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::NewsNotFound(_)
                | Self::PhotoNotFound(_)
        )
    }

    /// Check if this is a validation error
    ///
    /// Business rule violations are reported as validation failures too.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidRating(_)
                | Self::EmptyComment
                | Self::InvalidPhoneNumber
                | Self::InvalidCoordinates
                | Self::WeakPassword(_)
                | Self::ConsentRequired
                | Self::InvalidResetCode
                | Self::ContentTooLong { .. }
                | Self::BusinessNotVisible
                | Self::NotABusinessOwner
                | Self::CannotBanSelf
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MissingRole(_)
                | Self::NotBusinessOwner
                | Self::NotReviewAuthor
                | Self::AccountLocked
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::DuplicateReview | Self::CategoryNameExists
        )
    }
}
