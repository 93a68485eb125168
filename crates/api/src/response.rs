//! Response body for the dispatch endpoint.
//!
//! Every logical outcome of `POST /execute` is reported as HTTP 200 with
//! `{ "success": bool, "message": string }`; only transport-level problems
//! use other status codes.

use serde::{Deserialize, Serialize};

/// `{ "success": bool, "message": string }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub success: bool,
    pub message: String,
}

impl DispatchResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
