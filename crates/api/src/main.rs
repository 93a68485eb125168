//! `bubble` -- web front-end that enqueues Poppit jobs from button clicks.
//!
//! # Environment variables
//!
//! | Variable         | Required | Default      | Description                          |
//! |------------------|----------|--------------|--------------------------------------|
//! | `BUBBLE_CONFIG`  | no       | `config.yml` | Path of the YAML config file         |
//! | `REDIS_PASSWORD` | no       | --           | Overrides `redis.password`           |
//! | `RUST_LOG`       | no       | `info`       | Log filter (bubble crates, tower_http) |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bubble_api=info,bubble_core=info,bubble_queue=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = bubble_api::server::run().await {
        tracing::error!(error = %e, "Bubble failed");
        std::process::exit(1);
    }
}
