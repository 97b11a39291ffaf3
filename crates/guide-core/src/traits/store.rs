//! Short-lived key/value storage for tokens and one-time codes

use async_trait::async_trait;
use std::time::Duration;

use super::repositories::RepoResult;

/// Expiring string store
///
/// Backed by Redis in production and by an in-process map when Redis is not
/// configured. Entries vanish once their TTL elapses.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Store a value, replacing any previous one, for `ttl`
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()>;

    /// Read a value without consuming it
    async fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Read and delete in one step; a second `take` of the same key yields `None`
    async fn take(&self, key: &str) -> RepoResult<Option<String>>;

    /// Delete the entry only if it is live and equals `expected`
    ///
    /// Returns true when this call consumed it. A mismatch leaves the entry
    /// in place, and of two concurrent matching calls only one succeeds.
    async fn take_if_eq(&self, key: &str, expected: &str) -> RepoResult<bool>;

    async fn remove(&self, key: &str) -> RepoResult<()>;
}
