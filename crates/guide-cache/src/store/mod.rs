//! [`TokenStore`](guide_core::TokenStore) implementations.

mod memory_store;
mod redis_store;

pub use memory_store::MemoryTokenStore;
pub use redis_store::RedisTokenStore;
