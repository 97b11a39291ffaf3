//! # guide-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! ports used to reach outbound services (SMS, mail, language model, token store).
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AdminAction, AdminLog, Business, BusinessOrigin, BusinessPatch, BusinessStatusFilter, Category,
    Favorite, FavoriteFan, NewAdminLog, NewBusiness, NewCategory, NewNews, NewReview, NewUser,
    NewUserPhoto, News, NewsPatch, Review, ReviewStatusFilter, User, UserPhoto, UserProfilePatch,
};
pub use error::DomainError;
pub use traits::{
    AdminLogRepository, BusinessFilter, BusinessRepository, BusinessSort, CategoryCount,
    CategoryRepository, ChatModel, FavoriteRepository, GatewayError, Mailer, NewsRepository,
    OutgoingMail, RepoResult, ReviewRepository, SmsSender, TokenStore, UserPhotoRepository,
    UserRepository,
};
pub use value_objects::{GeoPoint, PhoneNumber, Rating, RatingSummary, Roles};
