//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AddPhotoRequest, AssignOwnerRequest, BusinessSearchParams, BusinessStatusQuery,
    ChangePasswordRequest, ChatRequest, ContactRequest, CreateBusinessRequest,
    CreateCategoryRequest, CreateNewsRequest, CreateReviewRequest, ForgotPasswordRequest,
    ForgotPasswordSmsRequest, LoginRequest, LogoutRequest, LogsQuery, RefreshTokenRequest,
    RegisterBusinessRequest, RegisterRequest, ResetPasswordRequest, ResetPasswordSmsRequest,
    ReviewStatusQuery, UpdateBusinessRequest, UpdateCategoryRequest, UpdateNewsRequest,
    UpdateProfileRequest,
};

// Re-export commonly used response types
pub use responses::{
    AdminLogResponse, AdminStatsResponse, ApiResponse, AuthResponse, BusinessDetailsResponse,
    BusinessRegistrationResponse, BusinessResponse, CategoryCountResponse, CategoryResponse,
    ChatResponse, CurrentUserResponse, FavoriteFanResponse, FavoriteToggleResponse, HealthChecks,
    HealthResponse, HomeResponse, LocationResponse, MapConfigResponse, MessageResponse,
    NewsResponse, OwnerDashboardResponse, PaginatedResponse, PaginationMeta, ReadinessResponse,
    ReviewResponse, UserPhotoResponse, UserSummaryResponse,
};
