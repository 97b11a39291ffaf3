//! # guide-cache
//!
//! Expiring key/value storage for password reset codes, reset tokens and
//! refresh-token sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Token Stores**: [`TokenStore`](guide_core::TokenStore) backed by Redis,
//!   or by an in-process map when Redis is not configured
//!
//! ## Example
//!
//! ```ignore
//! use guide_cache::{RedisPool, RedisPoolConfig, RedisTokenStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let store = RedisTokenStore::new(pool);
//! store.put("pwreset:sms:905551234567", "123456", Duration::from_secs(600)).await?;
//! ```

pub mod pool;
pub mod store;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use store::{MemoryTokenStore, RedisTokenStore};
