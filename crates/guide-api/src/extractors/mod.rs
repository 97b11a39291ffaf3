//! Axum extractors for request handling
//!
//! Custom extractors for authentication, role gates, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AdminUser, AuthUser, OptionalAuthUser, OwnerUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{IdPath, UserRolePath};
pub use validated::ValidatedJson;
