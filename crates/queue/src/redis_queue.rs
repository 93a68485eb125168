//! Redis list implementation of [`NotificationQueue`].

use async_trait::async_trait;
use bubble_core::config::RedisSettings;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, ConnectionInfo, IntoConnectionInfo};
use tracing::info;

use crate::{NotificationQueue, QueueError};

/// Address used when `redis.addr` is empty.
const DEFAULT_ADDR: &str = "localhost:6379";

/// Redis-backed notification queue.
///
/// Holds one multiplexed connection; clones of it share the underlying
/// socket, so concurrent handlers never wait on a pool checkout.
pub struct RedisQueue {
    connection: MultiplexedConnection,
    addr: String,
}

impl RedisQueue {
    /// Connect to Redis and verify the connection with `PING`.
    pub async fn connect(settings: &RedisSettings) -> Result<Self, QueueError> {
        let info = connection_info(settings)?;
        let addr = normalize_addr(&settings.addr);

        let client = Client::open(info).map_err(|source| QueueError::InvalidAddress {
            addr: addr.clone(),
            source,
        })?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(QueueError::Connection)?;

        let queue = Self { connection, addr };
        queue.ping().await?;

        info!(addr = %queue.addr, "Connected to Redis");
        Ok(queue)
    }
}

#[async_trait]
impl NotificationQueue for RedisQueue {
    async fn push(&self, list: &str, payload: &str) -> Result<(), QueueError> {
        let mut conn = self.connection.clone();

        let len: i64 = conn.rpush(list, payload).await?;

        tracing::debug!(list = %list, len, "Notification appended");
        Ok(())
    }

    async fn ping(&self) -> Result<(), QueueError> {
        let mut conn = self.connection.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(QueueError::Connection)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), QueueError> {
        // No explicit close on a multiplexed connection; the socket goes
        // away when the last `AppState` clone holding this queue drops.
        info!(addr = %self.addr, "Redis queue shutting down");
        Ok(())
    }
}

/// Build connection info from settings: accepts `host:port` or a full URL,
/// and applies the password when one is configured.
pub fn connection_info(settings: &RedisSettings) -> Result<ConnectionInfo, QueueError> {
    let url = normalize_addr(&settings.addr);

    let mut info = url
        .as_str()
        .into_connection_info()
        .map_err(|source| QueueError::InvalidAddress {
            addr: settings.addr.clone(),
            source,
        })?;

    if !settings.password.is_empty() {
        info.redis.password = Some(settings.password.clone());
    }

    Ok(info)
}

fn normalize_addr(addr: &str) -> String {
    let addr = addr.trim();
    if addr.is_empty() {
        format!("redis://{DEFAULT_ADDR}")
    } else if addr.contains("://") {
        addr.to_string()
    } else {
        format!("redis://{addr}")
    }
}
