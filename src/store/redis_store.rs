//! Redis Store Module
//!
//! Adapter over a single multiplexed connection to a Redis server.

use std::collections::HashMap;
use std::future::Future;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

// == Error Classification ==
fn is_wrong_type(err: &RedisError) -> bool {
    err.code() == Some("WRONGTYPE") || err.to_string().starts_with("WRONGTYPE")
}

fn is_connection_failure(err: &RedisError) -> bool {
    err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout()
}

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        if is_wrong_type(&err) {
            StoreError::WrongType
        } else if is_connection_failure(&err) {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

// == Redis Store ==
/// One shared connection, opened lazily and reopened after it breaks.
///
/// The multiplexed connection is cloned per command, so concurrent requests
/// pipeline over the same socket; the lock only guards the handle slot.
pub struct RedisStore {
    client: Client,
    connection: RwLock<Option<MultiplexedConnection>>,
}

impl RedisStore {
    // == Constructor ==
    /// Parses the URL. No connection is made until the first command.
    pub fn open(url: &str) -> StoreResult<Self> {
        let client = Client::open(url)?;
        Ok(Self {
            client,
            connection: RwLock::new(None),
        })
    }

    async fn connection(&self) -> StoreResult<MultiplexedConnection> {
        if let Some(conn) = self.connection.read().await.as_ref() {
            return Ok(conn.clone());
        }

        let mut slot = self.connection.write().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self.client.get_multiplexed_async_connection().await?;
        debug!("Opened connection to {:?}", self.client.get_connection_info().addr);
        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Runs one command, dropping the cached connection if it broke.
    async fn run<T, F, Fut>(&self, command: F) -> StoreResult<T>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let conn = self.connection().await?;
        match command(conn).await {
            Ok(value) => Ok(value),
            Err(err) => {
                if is_connection_failure(&err) {
                    warn!("Redis connection lost, reconnecting on next command: {}", err);
                    *self.connection.write().await = None;
                }
                Err(err.into())
            }
        }
    }

    // == Commands ==

    pub async fn ping(&self) -> StoreResult<()> {
        let _pong: String = self
            .run(|mut conn| async move { redis::cmd("PING").query_async(&mut conn).await })
            .await?;
        Ok(())
    }

    pub async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _: () = self
            .run(|mut conn| async move { conn.set(key, value).await })
            .await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.run(|mut conn| async move { conn.get(key).await }).await
    }

    pub async fn lpush(&self, key: &str, value: &str) -> StoreResult<i64> {
        self.run(|mut conn| async move { conn.lpush(key, value).await })
            .await
    }

    pub async fn lrange(&self, key: &str) -> StoreResult<Vec<Vec<u8>>> {
        self.run(|mut conn| async move { conn.lrange(key, 0, -1).await })
            .await
    }

    pub async fn sadd(&self, key: &str, member: &str) -> StoreResult<i64> {
        self.run(|mut conn| async move { conn.sadd(key, member).await })
            .await
    }

    pub async fn smembers(&self, key: &str) -> StoreResult<Vec<Vec<u8>>> {
        self.run(|mut conn| async move { conn.smembers(key).await })
            .await
    }

    pub async fn hset(&self, key: &str, field: &str, value: &str) -> StoreResult<i64> {
        self.run(|mut conn| async move { conn.hset(key, field, value).await })
            .await
    }

    pub async fn hgetall(&self, key: &str) -> StoreResult<HashMap<Vec<u8>, Vec<u8>>> {
        self.run(|mut conn| async move { conn.hgetall(key).await })
            .await
    }

    pub async fn zadd(&self, key: &str, member: &str, score: i64) -> StoreResult<i64> {
        self.run(|mut conn| async move { conn.zadd(key, member, score).await })
            .await
    }

    pub async fn zrange_withscores(&self, key: &str) -> StoreResult<Vec<(Vec<u8>, f64)>> {
        self.run(|mut conn| async move { conn.zrange_withscores(key, 0, -1).await })
            .await
    }

    pub async fn incr(&self, key: &str) -> StoreResult<i64> {
        self.run(|mut conn| async move { conn.incr(key, 1).await })
            .await
    }
}
