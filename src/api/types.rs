//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /tasks`.
///
/// Both fields are required; they are deserialized as options so that
/// validation can report missing fields with stable message codes
/// instead of a deserializer rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for `PUT /tasks/{id}`. Both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Success envelope wrapping a payload.
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse<T> {
    pub status: &'static str,
    pub details: T,
}

impl<T> OkResponse<T> {
    pub fn new(details: T) -> Self {
        Self {
            status: "Ok",
            details,
        }
    }
}

/// Envelope for a successful bulk import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    pub status: &'static str,
    pub message: &'static str,

    /// Number of rows imported
    pub imported: usize,
}

/// Error envelope with a single message code.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
