use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bubble_core::error::CoreError;
use bubble_queue::QueueError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Dispatch outcomes never use this type: they are reported in-band as
/// [`DispatchResponse`](crate::response::DispatchResponse). It covers the
/// transport-level failures that warrant a non-200 status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Failures that stop the server from starting or running.
///
/// Returned by [`server::run`](crate::server::run); the binary decides how
/// to exit.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("Failed to connect to Redis: {0}")]
    Queue(#[from] QueueError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    #[error("Server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
