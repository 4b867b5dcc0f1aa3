//! Axum route handlers for the skill gap API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyzer::{ProcessedJob, ProcessedResume, StoredAnalysis};
use crate::analysis::gap::SkillGapReport;
use crate::errors::AppError;
use crate::models::{CandidateResumeRow, JobDescriptionRow, SkillAnalysisRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub resume: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub job_skills: Vec<String>,
    pub candidate_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<ProcessedJob>, AppError> {
    require_text("description", &request.description)?;
    let processed = state
        .analyzer
        .process_job_description(&request.description)
        .await?;
    Ok(Json(processed))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDescriptionRow>, AppError> {
    Ok(Json(state.analyzer.store().get_job_description(id).await?))
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ProcessedResume>, AppError> {
    require_text("resume", &request.resume)?;
    let processed = state.analyzer.process_resume(&request.resume).await?;
    Ok(Json(processed))
}

/// POST /api/v1/candidates/upload
///
/// Accepts a multipart form with a PDF in the `file` field, extracts its text, and
/// processes it as a resume.
pub async fn handle_upload_candidate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessedResume>, AppError> {
    let mut pdf = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            pdf = Some(bytes);
            break;
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;
    info!("Received resume upload ({} bytes)", pdf.len());

    // pdf-extract is CPU-bound and may panic on malformed input.
    let resume = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;
    require_text("resume", &resume)?;

    let processed = state.analyzer.process_resume(&resume).await?;
    Ok(Json(processed))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateResumeRow>, AppError> {
    Ok(Json(state.analyzer.store().get_candidate_resume(id).await?))
}

/// POST /api/v1/analyses/preview
///
/// Compares two skill lists without storing anything.
pub async fn handle_preview_analysis(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Json<SkillGapReport> {
    Json(
        state
            .analyzer
            .analyze_skill_gap(request.job_skills.as_slice(), request.candidate_skills.as_slice()),
    )
}

/// POST /api/v1/analyses
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<StoredAnalysis>, AppError> {
    let stored = state
        .analyzer
        .analyze_stored(request.job_id, request.candidate_id)
        .await?;
    Ok(Json(stored))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SkillAnalysisRow>, AppError> {
    Ok(Json(state.analyzer.store().get_skill_analysis(id).await?))
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
