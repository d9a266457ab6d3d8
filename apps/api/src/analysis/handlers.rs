//! Axum route handlers for resume matching, cover letters and suggestion edits.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::editor::{apply_suggestions, ApplyOutcome};
use crate::analysis::prompts::{compose_cover_letter_prompt, compose_match_prompt};
use crate::analysis::response_parser::{parse_completion, SuggestionEdit};
use crate::analysis::upload::UploadForm;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    /// Narrative analysis with the JSON edit block removed.
    pub result: String,
    pub resume_text: String,
    pub suggestions: Vec<SuggestionEdit>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplySuggestionsRequest {
    pub resume_text: String,
    pub suggestions: Vec<SuggestionEdit>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /match/
///
/// Multipart fields `resume` and `job_desc`. Extracts both documents, asks the
/// completion service for a match analysis and splits out the suggested edits.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let resume = form.require_file("resume")?;
    let job_desc = form.require_file("job_desc")?;

    let resume_text = resume.extract_text().await?;
    let job_text = job_desc.extract_text().await?;

    let prompt = compose_match_prompt(&resume_text, &job_text);
    let raw = state.llm.complete(&prompt, &state.config.llm_model).await?;
    debug!(response_len = raw.len(), "Match completion received");

    let parsed = parse_completion(&raw);
    info!(
        suggestions = parsed.suggestions.len(),
        "Resume match analysis complete"
    );

    Ok(Json(MatchResponse {
        result: parsed.narrative_text,
        resume_text,
        suggestions: parsed.suggestions,
    }))
}

/// POST /generate-cover-letter/
///
/// Multipart fields `resume`, `job_desc`, plus an optional existing letter given as
/// `existing_letter_file` or `existing_letter_text`. The file wins when both are sent.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let resume = form.require_file("resume")?;
    let job_desc = form.require_file("job_desc")?;

    let resume_text = resume.extract_text().await?;
    let job_text = job_desc.extract_text().await?;

    let existing_letter = match form.take_file("existing_letter_file") {
        Some(file) => Some(file.extract_text().await?),
        None => form.take_text("existing_letter_text"),
    };

    let prompt =
        compose_cover_letter_prompt(&resume_text, &job_text, existing_letter.as_deref());
    let cover_letter = state.llm.complete(&prompt, &state.config.llm_model).await?;
    debug!(raw = %cover_letter, "Cover letter completion received");

    Ok(Json(CoverLetterResponse {
        cover_letter: cover_letter.trim().to_string(),
    }))
}

/// POST /resume/apply-suggestions
pub async fn handle_apply_suggestions(
    Json(request): Json<ApplySuggestionsRequest>,
) -> Json<ApplyOutcome> {
    Json(apply_suggestions(&request.resume_text, &request.suggestions))
}
