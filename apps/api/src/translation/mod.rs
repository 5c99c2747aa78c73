//! Translation Stage — second, independent generation call that rewrites
//! previously generated HTML-bearing text into Croatian while preserving
//! every markup tag verbatim.
//!
//! Two properly role-tagged messages: a system persona and a user message
//! carrying the instruction plus the text. Fixed low creativity. The result
//! is returned unmodified — no re-parsing. Works on arbitrary caller-supplied
//! text, not only output produced by this service.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::AuditLog;
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, TextGenerator};
use crate::state::AppState;

/// Translation uses a fixed low temperature.
const TRANSLATION_TEMPERATURE: f32 = 0.4;
const MAX_TRANSLATION_TOKENS: u32 = 2000;

const TRANSLATOR_PERSONA: &str = "You are a native Croatian citizen who translates texts for a \
     living. You are also an expert in HTML.";

const TRANSLATE_INSTRUCTION: &str = "Translate all the text inside the following code into \
     Croatian. Keep every HTML tag exactly as it appears:";

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub result: String,
}

/// Translates one piece of markup-bearing text. Single attempt; same failure
/// modes as biography generation.
pub async fn translate(generator: &dyn TextGenerator, text: &str) -> Result<String, AppError> {
    let messages = [
        ChatMessage::system(TRANSLATOR_PERSONA),
        ChatMessage::user(format!("{TRANSLATE_INSTRUCTION}\n{text}")),
    ];
    let translated = generator
        .complete(&messages, TRANSLATION_TEMPERATURE, MAX_TRANSLATION_TOKENS)
        .await?;
    Ok(translated)
}

/// POST /api/v1/translation
///
/// Translates caller-supplied text to Croatian, preserving markup.
pub async fn handle_translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    info!("Translating {} chars to Croatian", request.text.len());
    let result = translate(state.generator.as_ref(), &request.text).await?;

    audit_translation(&state.audit, request.text, &result);

    Ok(Json(TranslateResponse { result }))
}

fn audit_translation(audit: &AuditLog, source: String, translated: &str) {
    audit.dispatch(source, translated.to_string());
}
