//! Database models - SQLx-compatible structs for PostgreSQL tables

mod admin_log;
mod business;
mod category;
mod favorite;
mod news;
mod review;
mod user;
mod user_photo;

pub use admin_log::AdminLogModel;
pub use business::BusinessModel;
pub use category::{CategoryCountModel, CategoryModel};
pub use favorite::FavoriteFanModel;
pub use news::NewsModel;
pub use review::ReviewModel;
pub use user::UserModel;
pub use user_photo::UserPhotoModel;
