//! API error responses.
//!
//! Every failing handler returns an [`ApiError`], rendered as
//! `{"code": ..., "message": ...}` with a matching status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::storage::DatabaseError;

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Structured API error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    /// 404 for a tent id the store does not know.
    pub fn not_found(id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("tent {id} not found"),
        )
    }

    /// 400 for input that fails coercion.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_input", message)
    }

    /// 500 with the cause logged server-side only.
    pub fn internal(context: &str, err: &dyn std::error::Error) -> Self {
        error!(error = %err, "{context}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", context)
    }

    /// Map a store failure, turning `NotFound` into a 404 for `id`.
    pub fn from_store(context: &str, id: &str, err: &DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(_) => Self::not_found(id),
            other => Self::internal(context, other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<tentrack_core::Error> for ApiError {
    fn from(err: tentrack_core::Error) -> Self {
        Self::invalid_input(err.to_string())
    }
}
