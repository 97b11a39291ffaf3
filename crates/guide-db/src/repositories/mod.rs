//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in guide-core.
//! Each repository handles database operations for a specific domain entity.

mod admin_log;
mod business;
mod category;
mod error;
mod favorite;
mod news;
mod review;
mod user;
mod user_photo;

pub use admin_log::PgAdminLogRepository;
pub use business::PgBusinessRepository;
pub use category::PgCategoryRepository;
pub use favorite::PgFavoriteRepository;
pub use news::PgNewsRepository;
pub use review::PgReviewRepository;
pub use user::PgUserRepository;
pub use user_photo::PgUserPhotoRepository;
