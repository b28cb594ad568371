use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::login::{LoginRecord, NewLogin};
use crate::models::resume::ResumeDocument;
use crate::render::{
    plan_for_document, plan_render, RenderPlan, TemplateDescriptor, TemplateStyle, TEMPLATES,
};
use crate::resumes::validation::{normalize_username, validate_document};
use crate::sections::{reconcile, EditCommand, EditReport};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub owner_id: Uuid,
    pub document: ResumeDocument,
    /// False when no document is stored yet and a default was returned.
    pub persisted: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApplyEditsRequest {
    pub document: ResumeDocument,
    #[serde(default)]
    pub commands: Vec<EditCommand>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyEditsResponse {
    pub document: ResumeDocument,
    pub report: EditReport,
}

#[derive(Debug, Deserialize)]
pub struct RenderPlanRequest {
    pub document: ResumeDocument,
    /// Overrides the document's own template.
    #[serde(default)]
    pub template: Option<TemplateStyle>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCvResponse {
    pub username: String,
    pub document: ResumeDocument,
    pub plan: RenderPlan,
}

/// GET /api/v1/resumes/:owner_id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let stored = state.store.load(owner_id).await?;
    let persisted = stored.is_some();
    let document = reconcile(stored.unwrap_or_default()).into_document();
    Ok(Json(ResumeResponse {
        owner_id,
        document,
        persisted,
    }))
}

/// PUT /api/v1/resumes/:owner_id
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(mut doc): Json<ResumeDocument>,
) -> Result<Json<ResumeResponse>, AppError> {
    normalize_username(&mut doc);
    let problems = validate_document(&doc);
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }

    let _ticket = state
        .save_guard
        .try_begin(owner_id)
        .ok_or(AppError::SaveInProgress)?;

    let document = reconcile(doc).into_document();
    state.store.save(owner_id, &document).await?;

    Ok(Json(ResumeResponse {
        owner_id,
        document,
        persisted: true,
    }))
}

/// POST /api/v1/resumes/:owner_id/logins
pub async fn handle_record_login(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(login): Json<NewLogin>,
) -> Result<StatusCode, AppError> {
    let record = LoginRecord::stamped(login, Utc::now());
    state
        .store
        .record_login(owner_id, record, state.config.login_history_limit)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:owner_id/logins
pub async fn handle_login_history(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<LoginRecord>>, AppError> {
    Ok(Json(state.store.login_history(owner_id).await?))
}

/// POST /api/v1/layout/apply
///
/// Reconciles the submitted document, applies the edits in order, and returns the
/// result without saving it.
pub async fn handle_apply_edits(
    Json(req): Json<ApplyEditsRequest>,
) -> Result<Json<ApplyEditsResponse>, AppError> {
    let mut resume = reconcile(req.document);
    let report = resume.apply_all(req.commands);
    debug!(
        applied = report.applied,
        noops = report.noops,
        stale = report.stale_moves,
        "Applied layout edits"
    );
    Ok(Json(ApplyEditsResponse {
        document: resume.into_document(),
        report,
    }))
}

/// POST /api/v1/render/plan
pub async fn handle_render_plan(
    Json(req): Json<RenderPlanRequest>,
) -> Result<Json<RenderPlan>, AppError> {
    let resume = reconcile(req.document);
    let plan = match req.template {
        Some(style) => plan_render(&resume, style),
        None => plan_for_document(&resume),
    };
    Ok(Json(plan))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [TemplateDescriptor]> {
    Json(&TEMPLATES[..])
}

/// GET /api/v1/cv/:username
pub async fn handle_public_cv(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PublicCvResponse>, AppError> {
    let username = username.trim().to_string();
    let (owner_id, doc) = state
        .store
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No public CV for '{username}'")))?;

    info!("Serving public CV '{username}' for owner {owner_id}");
    let resume = reconcile(doc);
    let plan = plan_for_document(&resume);
    Ok(Json(PublicCvResponse {
        username,
        document: resume.into_document(),
        plan,
    }))
}
