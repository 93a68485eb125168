//! Handler for dispatching a configured command to Poppit.
//!
//! Each call performs at most one queue append. All outcomes are returned
//! as HTTP 200 with a [`DispatchResponse`]; failures are logged here.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use bubble_core::command::NotificationMessage;
use serde_json::Value;

use crate::response::DispatchResponse;
use crate::state::AppState;

pub const INVALID_REQUEST: &str = "Invalid request";
pub const COMMAND_NOT_FOUND: &str = "Command not found";
pub const NOTIFICATION_FAILED: &str = "Failed to create notification";
pub const QUEUE_FAILED: &str = "Failed to send command to Poppit";

/// Request body for POST /execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteRequest {
    pub name: String,
}

impl ExecuteRequest {
    /// Decode the first JSON value in `body`; anything after it is ignored.
    ///
    /// `null` (as the whole body or as `name`) and a missing `name` decode
    /// to an empty name. The key is matched exactly first, then
    /// case-insensitively. Returns `None` for malformed JSON, a non-object
    /// body, or a non-string `name`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let first = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next()?;

        let fields = match first.ok()? {
            Value::Null => return Some(Self { name: String::new() }),
            Value::Object(fields) => fields,
            _ => return None,
        };

        let value = fields.get("name").or_else(|| {
            fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("name"))
                .map(|(_, value)| value)
        });

        let name = match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(name)) => name.clone(),
            Some(_) => return None,
        };

        Some(Self { name })
    }
}

/// POST /execute
///
/// Looks up the named command and appends its notification to the
/// configured Redis list. The body is parsed by hand so malformed JSON is
/// answered in-band instead of with an extractor rejection.
pub async fn execute_command(State(state): State<AppState>, body: Bytes) -> Json<DispatchResponse> {
    let Some(request) = ExecuteRequest::from_body(&body) else {
        tracing::warn!(bytes = body.len(), "Rejected malformed execute request");
        return Json(DispatchResponse::failure(INVALID_REQUEST));
    };

    let Some(definition) = state.config.find_command(&request.name) else {
        tracing::warn!(name = %request.name, "Unknown command requested");
        return Json(DispatchResponse::failure(COMMAND_NOT_FOUND));
    };

    let payload = match NotificationMessage::from(definition).to_json() {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(name = %request.name, error = %e, "Failed to serialize notification");
            return Json(DispatchResponse::failure(NOTIFICATION_FAILED));
        }
    };

    let list = &state.config.redis.list_name;
    if let Err(e) = state.queue.push(list, &payload).await {
        tracing::error!(
            name = %request.name,
            list = %list,
            error = %e,
            "Failed to push notification to Redis"
        );
        return Json(DispatchResponse::failure(QUEUE_FAILED));
    }

    tracing::info!(name = %request.name, list = %list, "Command sent to Poppit");
    Json(DispatchResponse::success(format!(
        "Command '{}' sent to Poppit successfully!",
        request.name
    )))
}
