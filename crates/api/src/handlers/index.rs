use axum::extract::State;
use axum::response::Html;

use crate::error::{AppError, AppResult};
use crate::page;
use crate::state::AppState;

/// GET /
///
/// Lists every configured command as a button.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let html = page::render_index(&state.config.commands)
        .map_err(|e| AppError::InternalError(format!("Failed to render index page: {e}")))?;

    Ok(Html(html))
}
