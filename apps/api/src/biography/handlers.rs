//! Axum route handlers for the biography generation API.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::applicant::validate::validate_applicant;
use crate::biography::compiler::OutputMode;
use crate::biography::generator::{run_pipeline, BiographyOutput};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: BiographyOutput,
}

/// POST /api/v1/biography/document
///
/// Validates the questionnaire and generates one styled HTML document.
pub async fn handle_generate_document(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GenerateResponse>, AppError> {
    generate(state, body, OutputMode::Document).await
}

/// POST /api/v1/biography/sections
///
/// Validates the questionnaire and generates the four-key sectioned record.
pub async fn handle_generate_sections(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GenerateResponse>, AppError> {
    generate(state, body, OutputMode::Sectioned).await
}

async fn generate(
    state: AppState,
    body: Value,
    mode: OutputMode,
) -> Result<Json<GenerateResponse>, AppError> {
    // Validation short-circuits before any external call.
    let record = validate_applicant(&body).map_err(|e| AppError::Validation(e.to_string()))?;

    let result = run_pipeline(state.generator.as_ref(), &state.audit, &record, mode).await?;

    Ok(Json(GenerateResponse { result }))
}
