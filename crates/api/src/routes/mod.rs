pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the user-facing route tree.
///
/// ```text
/// /           GET   button page
/// /execute    POST  dispatch a command to Poppit
/// ```
///
/// Other methods on these paths get 405 from the method router.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/execute", post(handlers::execute::execute_command))
}
