//! # guide-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `guide-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations, including the transactional rating recompute
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guide_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use guide_db::repositories::PgBusinessRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/guide")).await?;
//!     run_migrations(&pool).await?;
//!     let businesses = PgBusinessRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgAdminLogRepository, PgBusinessRepository, PgCategoryRepository, PgFavoriteRepository,
    PgNewsRepository, PgReviewRepository, PgUserPhotoRepository, PgUserRepository,
};
