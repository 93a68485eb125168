//! Queue adapter for Poppit notifications.
//!
//! Handlers depend on the [`NotificationQueue`] trait so tests can swap in
//! an in-memory recorder; production uses [`RedisQueue`], which appends to
//! a Redis list with `RPUSH`.

pub mod redis_queue;

use async_trait::async_trait;

pub use redis_queue::RedisQueue;

/// Errors raised while talking to the notification queue.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid queue address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: redis::RedisError,
    },

    #[error("Queue connection failed: {0}")]
    Connection(#[source] redis::RedisError),

    #[error("Queue command failed: {0}")]
    Command(#[from] redis::RedisError),
}

/// Producer side of the list Poppit consumes.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Append `payload` to the tail of `list`.
    async fn push(&self, list: &str, payload: &str) -> Result<(), QueueError>;

    /// Round-trip check used at startup and by `/health`.
    async fn ping(&self) -> Result<(), QueueError>;

    /// Shutdown hook, called once after the server stops serving.
    ///
    /// Implementations may not free their connection here; for Redis the
    /// socket closes when the last handle to the queue is dropped.
    async fn close(&self) -> Result<(), QueueError> {
        Ok(())
    }
}
