//! Application services
//!
//! Each service borrows the [`ServiceContext`] and implements one area of
//! the directory: accounts, public browsing, reviews, favorites, owner
//! tools, administration and the outbound integrations.

mod access;

pub mod admin;
pub mod assistant;
pub mod audit;
pub mod auth;
pub mod contact;
pub mod context;
pub mod directory;
pub mod error;
pub mod favorite;
pub mod news;
pub mod owner;
pub mod password_reset;
pub mod profile;
pub mod review;
pub mod submission;

pub use admin::{AdminService, MAX_LOG_ENTRIES};
pub use assistant::{build_prompt, AssistantService};
pub use audit::AuditLogger;
pub use auth::AuthService;
pub use contact::ContactService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use directory::DirectoryService;
pub use error::{ServiceError, ServiceResult};
pub use favorite::FavoriteService;
pub use news::NewsService;
pub use owner::OwnerService;
pub use password_reset::{reset_code_message, PasswordResetService};
pub use profile::ProfileService;
pub use review::ReviewService;
pub use submission::BusinessSubmissionService;
