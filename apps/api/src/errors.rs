use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Audit persistence failures deliberately have no variant here: they are
/// logged inside the sink and never surfaced to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation service unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Generation service returned an empty response")]
    EmptyGeneration,

    #[error("Generation output did not match the expected structure: {0}")]
    MalformedGeneration(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::EmptyChoices => AppError::EmptyGeneration,
            other => AppError::GenerationUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::GenerationUnavailable(msg) => {
                tracing::error!("Generation service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_UNAVAILABLE",
                    "The text generation service is unavailable".to_string(),
                )
            }
            AppError::EmptyGeneration => (
                StatusCode::BAD_GATEWAY,
                "EMPTY_GENERATION",
                "The text generation service returned an empty response".to_string(),
            ),
            AppError::MalformedGeneration(msg) => {
                tracing::error!("Malformed generation output: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_GENERATION",
                    "The text generation service returned an unexpected format".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
