//! Biography generation — orchestrates one pipeline run.
//!
//! Flow: compile prompt → single generation call → interpret (pass-through
//! or sectioned parse) → fire-and-forget audit append → return.
//!
//! The generation call is a single attempt. The audit write never gates the
//! response.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::applicant::models::ApplicantRecord;
use crate::audit::AuditLog;
use crate::biography::compiler::{compile_prompt, OutputMode};
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, ChatMessage, TextGenerator};

/// Output ceiling for biography generation calls.
const MAX_GENERATION_TOKENS: u32 = 2500;

/// The fixed four-key record produced in sectioned mode. Key names are part
/// of the output contract the generator is instructed to satisfy; unknown
/// keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionedBiography {
    #[serde(rename = "Presentation")]
    pub presentation: String,
    #[serde(rename = "Employment")]
    pub employment: String,
    #[serde(rename = "Ancestor")]
    pub ancestor: String,
    #[serde(rename = "Motivation")]
    pub motivation: String,
}

/// Result of one pipeline run, shaped by the operating mode.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BiographyOutput {
    Document(String),
    Sectioned(SectionedBiography),
}

/// Runs the full pipeline for one validated record.
pub async fn run_pipeline(
    generator: &dyn TextGenerator,
    audit: &AuditLog,
    record: &ApplicantRecord,
    mode: OutputMode,
) -> Result<BiographyOutput, AppError> {
    let prompt = compile_prompt(record, mode);
    info!(
        "Generating biography ({mode:?} mode, creativity={})",
        prompt.creativity()
    );

    // The compiled prompt is the sole instruction, sent as the system message.
    let messages = [ChatMessage::system(prompt.text())];
    let raw = generator
        .complete(&messages, prompt.creativity(), MAX_GENERATION_TOKENS)
        .await?;

    let output = interpret(&raw, mode)?;

    audit.dispatch(prompt.text().to_string(), raw);
    Ok(output)
}

/// Output Interpreter: document mode passes the text through unmodified;
/// sectioned mode requires a parseable four-key JSON object.
fn interpret(raw: &str, mode: OutputMode) -> Result<BiographyOutput, AppError> {
    match mode {
        OutputMode::Document => Ok(BiographyOutput::Document(raw.to_string())),
        OutputMode::Sectioned => {
            let stripped = strip_json_fences(raw);
            let sections: SectionedBiography = serde_json::from_str(stripped)
                .map_err(|e| AppError::MalformedGeneration(e.to_string()))?;
            Ok(BiographyOutput::Sectioned(sections))
        }
    }
}
