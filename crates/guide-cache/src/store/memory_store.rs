//! In-process token store used when Redis is not configured.
//!
//! Entries live only as long as the process. Expired entries are dropped
//! lazily on access and by [`MemoryTokenStore::purge_expired`], which the
//! server runs periodically through [`MemoryTokenStore::spawn_purge_task`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use guide_common::constant_time_eq;
use guide_core::traits::{RepoResult, TokenStore};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: DashMap<String, Entry>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before - self.entries.len()
    }

    /// Purge expired entries every `every` until the store is dropped
    pub fn spawn_purge_task(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let store = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let purged = store.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, remaining = store.len(), "Purged expired tokens");
                }
            }
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let now = Instant::now();
        let live = self
            .entries
            .get(key)
            .map(|entry| entry.is_live(now).then(|| entry.value.clone()));

        match live {
            Some(Some(value)) => Ok(Some(value)),
            Some(None) => {
                self.entries.remove_if(key, |_, entry| !entry.is_live(now));
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn take(&self, key: &str) -> RepoResult<Option<String>> {
        let now = Instant::now();
        Ok(self
            .entries
            .remove(key)
            .and_then(|(_, entry)| entry.is_live(now).then_some(entry.value)))
    }

    async fn take_if_eq(&self, key: &str, expected: &str) -> RepoResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .remove_if(key, |_, entry| {
                entry.is_live(now) && constant_time_eq(&entry.value, expected)
            })
            .is_some())
    }

    async fn remove(&self, key: &str) -> RepoResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
