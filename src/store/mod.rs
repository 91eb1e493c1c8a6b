//! Store Module
//!
//! Typed wrappers over the key-value store commands the gateway exposes.
//! Values come back from the store as bytes and are decoded to text here,
//! so handlers only ever see `String`s.

mod memory;
mod redis_store;
mod value;

#[cfg(test)]
mod property_tests;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::{Config, StoreBackend};
use crate::error::StoreResult;

// Re-export public types
pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;
pub use self::value::StoredValue;

/// Key of the page visit counter.
pub const VISIT_COUNTER_KEY: &str = "visit_count";

// == Scored Member ==
/// One sorted-set member with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMember {
    pub member: String,
    pub score: f64,
}

impl ScoredMember {
    pub fn new(member: impl Into<String>, score: f64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}

/// Decodes a binary-safe store value for embedding in JSON.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_all(values: Vec<Vec<u8>>) -> Vec<String> {
    values.iter().map(|v| decode_text(v)).collect()
}

// == Store ==
/// Handle to the configured store, cheap to clone into every handler.
#[derive(Clone)]
pub enum Store {
    Redis(Arc<RedisStore>),
    Memory(Arc<RwLock<MemoryStore>>),
}

impl Store {
    /// Creates a store handle for a Redis server. Does not connect.
    pub fn redis(url: &str) -> StoreResult<Self> {
        Ok(Store::Redis(Arc::new(RedisStore::open(url)?)))
    }

    /// Creates an empty in-process store.
    pub fn memory() -> Self {
        Store::Memory(Arc::new(RwLock::new(MemoryStore::new())))
    }

    /// Creates the store selected by the configuration.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        match config.store_backend {
            StoreBackend::Redis => Self::redis(&config.redis_url),
            StoreBackend::Memory => Ok(Self::memory()),
        }
    }

    pub fn backend(&self) -> StoreBackend {
        match self {
            Store::Redis(_) => StoreBackend::Redis,
            Store::Memory(_) => StoreBackend::Memory,
        }
    }

    /// Liveness check.
    pub async fn ping(&self) -> StoreResult<()> {
        match self {
            Store::Redis(redis) => redis.ping().await,
            Store::Memory(_) => Ok(()),
        }
    }

    // == Strings ==

    pub async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            Store::Redis(redis) => redis.set(key, value).await,
            Store::Memory(memory) => {
                memory.write().await.set(key, value.as_bytes());
                Ok(())
            }
        }
    }

    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let raw = match self {
            Store::Redis(redis) => redis.get(key).await?,
            Store::Memory(memory) => memory.read().await.get(key)?,
        };
        Ok(raw.as_deref().map(decode_text))
    }

    /// Atomically increments an integer counter, returning the new value.
    pub async fn incr(&self, key: &str) -> StoreResult<i64> {
        match self {
            Store::Redis(redis) => redis.incr(key).await,
            Store::Memory(memory) => memory.write().await.incr(key),
        }
    }

    // == Lists ==

    /// Prepends to a list, returning its new length.
    pub async fn lpush(&self, key: &str, value: &str) -> StoreResult<i64> {
        match self {
            Store::Redis(redis) => redis.lpush(key, value).await,
            Store::Memory(memory) => Ok(memory.write().await.lpush(key, value.as_bytes())? as i64),
        }
    }

    /// Whole list, head first.
    pub async fn lrange(&self, key: &str) -> StoreResult<Vec<String>> {
        let raw = match self {
            Store::Redis(redis) => redis.lrange(key).await?,
            Store::Memory(memory) => memory.read().await.lrange(key)?,
        };
        Ok(decode_all(raw))
    }

    // == Sets ==

    /// Adds a member, returning how many members were new (0 or 1).
    pub async fn sadd(&self, key: &str, member: &str) -> StoreResult<i64> {
        match self {
            Store::Redis(redis) => redis.sadd(key, member).await,
            Store::Memory(memory) => {
                Ok(memory.write().await.sadd(key, member.as_bytes())? as i64)
            }
        }
    }

    /// Set members in lexicographic order.
    pub async fn smembers(&self, key: &str) -> StoreResult<Vec<String>> {
        let raw = match self {
            Store::Redis(redis) => redis.smembers(key).await?,
            Store::Memory(memory) => memory.read().await.smembers(key)?,
        };
        let mut members = decode_all(raw);
        members.sort();
        Ok(members)
    }

    // == Hashes ==

    /// Sets a hash field, returning how many fields were new (0 or 1).
    pub async fn hset(&self, key: &str, field: &str, value: &str) -> StoreResult<i64> {
        match self {
            Store::Redis(redis) => redis.hset(key, field, value).await,
            Store::Memory(memory) => Ok(memory
                .write()
                .await
                .hset(key, field.as_bytes(), value.as_bytes())? as i64),
        }
    }

    pub async fn hgetall(&self, key: &str) -> StoreResult<BTreeMap<String, String>> {
        let raw: Vec<(Vec<u8>, Vec<u8>)> = match self {
            Store::Redis(redis) => redis.hgetall(key).await?.into_iter().collect(),
            Store::Memory(memory) => memory.read().await.hgetall(key)?,
        };
        Ok(raw
            .iter()
            .map(|(field, value)| (decode_text(field), decode_text(value)))
            .collect())
    }

    // == Sorted Sets ==

    /// Sets a member's score, returning how many members were new (0 or 1).
    pub async fn zadd(&self, key: &str, member: &str, score: i64) -> StoreResult<i64> {
        match self {
            Store::Redis(redis) => redis.zadd(key, member, score).await,
            Store::Memory(memory) => Ok(memory
                .write()
                .await
                .zadd(key, member.as_bytes(), score as f64)? as i64),
        }
    }

    /// Every member with its score, lowest score first.
    pub async fn zrange_withscores(&self, key: &str) -> StoreResult<Vec<ScoredMember>> {
        let raw = match self {
            Store::Redis(redis) => redis.zrange_withscores(key).await?,
            Store::Memory(memory) => memory.read().await.zrange_withscores(key)?,
        };
        Ok(raw
            .iter()
            .map(|(member, score)| ScoredMember::new(decode_text(member), *score))
            .collect())
    }
}
