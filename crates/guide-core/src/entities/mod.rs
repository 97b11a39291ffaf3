//! Domain entities - core business objects

mod admin_log;
mod business;
mod category;
mod favorite;
mod news;
mod review;
mod user;
mod user_photo;

pub use admin_log::{AdminAction, AdminLog, NewAdminLog};
pub use business::{Business, BusinessOrigin, BusinessPatch, BusinessStatusFilter, NewBusiness};
pub use category::{Category, NewCategory};
pub use favorite::{Favorite, FavoriteFan};
pub use news::{NewNews, News, NewsPatch};
pub use review::{NewReview, Review, ReviewStatusFilter};
pub use user::{NewUser, User, UserProfilePatch};
pub use user_photo::{NewUserPhoto, UserPhoto};
