//! Redis-backed token store.

use std::time::Duration;

use async_trait::async_trait;
use guide_core::traits::{RepoResult, TokenStore};

use crate::pool::RedisPool;

/// Namespace prepended to every key so the store can share a Redis database
const KEY_PREFIX: &str = "guide:";

/// Token store using `SET EX` for writes, `GETDEL` for single-use reads and a
/// Lua compare-and-delete for `take_if_eq`
#[derive(Clone, Debug)]
pub struct RedisTokenStore {
    pool: RedisPool,
}

impl RedisTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()> {
        self.pool.set_ex(&Self::key(key), value, ttl.as_secs()).await?;
        tracing::debug!(key = %key, ttl_secs = ttl.as_secs(), "Stored token");
        Ok(())
    }

    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.pool.get_string(&Self::key(key)).await?)
    }

    async fn take(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.pool.get_del(&Self::key(key)).await?)
    }

    async fn take_if_eq(&self, key: &str, expected: &str) -> RepoResult<bool> {
        Ok(self.pool.delete_if_eq(&Self::key(key), expected).await?)
    }

    async fn remove(&self, key: &str) -> RepoResult<()> {
        self.pool.delete(&Self::key(key)).await?;
        Ok(())
    }
}
