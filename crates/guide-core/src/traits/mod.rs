//! Ports implemented by the infrastructure crates

mod gateways;
mod repositories;
mod store;

pub use gateways::{ChatModel, GatewayError, Mailer, OutgoingMail, SmsSender};
pub use repositories::{
    AdminLogRepository, BusinessFilter, BusinessRepository, BusinessSort, CategoryCount,
    CategoryRepository, FavoriteRepository, NewsRepository, RepoResult, ReviewRepository,
    UserPhotoRepository, UserRepository,
};
pub use store::TokenStore;
