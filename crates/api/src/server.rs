//! Server lifecycle: configuration, queue connection, serving and
//! bounded graceful shutdown.
//!
//! Every startup failure is returned as a [`StartupError`]; nothing here
//! exits the process.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bubble_core::config::AppConfig;
use bubble_queue::{NotificationQueue, RedisQueue};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinError;

use crate::error::StartupError;
use crate::router::build_app_router;
use crate::state::AppState;

/// Load configuration from the environment, connect to Redis, bind the
/// listener and serve until SIGINT or SIGTERM.
pub async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        redis = ?config.redis,
        commands = config.commands.len(),
        "Loaded configuration"
    );

    let queue: Arc<dyn NotificationQueue> = Arc::new(RedisQueue::connect(&config.redis).await?);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    tracing::info!(%addr, "Starting Bubble server");

    let state = AppState::new(Arc::new(config), queue);
    serve(listener, state, shutdown_signal()).await
}

/// Serve the application on `listener` until `shutdown` resolves.
///
/// After `shutdown`, in-flight connections get `server.shutdown_timeout_secs`
/// to finish before they are dropped. The queue is closed last, whether
/// the server stopped cleanly or not.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send,
{
    let grace = Duration::from_secs(state.config.server.shutdown_timeout_secs);
    let queue = Arc::clone(&state.queue);
    let app = build_app_router(state.clone(), &state.config.server);

    let drain = Arc::new(Notify::new());
    let drain_signal = Arc::clone(&drain);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { drain_signal.notified().await })
            .await
    });

    let exited_early = tokio::select! {
        joined = &mut server => Some(joined),
        () = shutdown => None,
    };

    let result = match exited_early {
        Some(joined) => flatten(joined),
        None => {
            tracing::info!(grace_secs = grace.as_secs(), "Shutting down server");
            drain.notify_one();
            match tokio::time::timeout(grace, &mut server).await {
                Ok(joined) => flatten(joined),
                Err(_) => {
                    tracing::warn!("Shutdown window elapsed, dropping open connections");
                    server.abort();
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = queue.close().await {
        tracing::error!(error = %e, "Redis close error");
    }

    tracing::info!("Server stopped");
    result
}

fn flatten(joined: Result<std::io::Result<()>, JoinError>) -> Result<(), StartupError> {
    joined?.map_err(StartupError::Server)
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed, that signal source is ignored and the other still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
