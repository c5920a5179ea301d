//! Error types.
//!
//! `GenerationError` never leaves the generator: every variant is folded into the
//! fallback path. Only `InputError` (and the HTTP-level `ApiError`) reach callers.

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failures of a single generation attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Network failure, timeout, non-success status, or no backend configured.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The isolated text is not parseable JSON.
    #[error("malformed content: {0}")]
    MalformedContent(String),

    /// Parses, but violates the expected shape or cardinality.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl GenerationError {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::BackendUnavailable(_) => "backend_unavailable",
            GenerationError::MalformedContent(_) => "malformed_content",
            GenerationError::SchemaMismatch(_) => "schema_mismatch",
        }
    }
}

/// Caller-facing validation failures, raised before any backend call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Topic is required")]
    EmptyTopic,

    #[error("Number of questions must be a positive integer (got {0})")]
    NonPositiveCount(i64),

    #[error("Number of questions must be at most {max} (got {got})")]
    CountTooLarge { got: i64, max: i64 },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),

    /// Request body missing, not JSON, or not the expected shape.
    #[error("Invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error("Quiz not found: {0}")]
    QuizNotFound(String),

    #[error("Learner not found: {0}")]
    LearnerNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::Input(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::QuizNotFound(_) | ApiError::LearnerNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
