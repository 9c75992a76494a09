use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::instrument;

use crate::{
    accounts::jwt::Session,
    documents::{report::Report, templates},
    errors::AppError,
    features::{
        dto::{
            AnalysisResponse, ContentResponse, CoverLetterRequest, InterviewPrepRequest,
            ReportRequest, ResumeForm, TemplateSummary,
        },
        services,
    },
    state::AppState,
};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/ats-score", post(ats_score))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

pub fn generation_routes() -> Router<AppState> {
    Router::new()
        .route("/resume-builder", post(resume_builder))
        .route("/cover-letter", post(cover_letter))
        .route("/interview-prep", post(interview_prep))
        .route("/reports", post(report))
}

pub fn template_routes() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates))
        .route("/templates/:name", get(get_template))
        .route("/templates/:name/download", get(download_template))
}

/// Resume file and job description pulled from a multipart form.
#[derive(Default)]
struct UploadForm {
    resume: Option<Bytes>,
    job_description: Option<String>,
}

async fn read_upload(mut mp: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume") => {
                form.resume = Some(field.bytes().await.map_err(|e| AppError::Validation(e.to_string()))?)
            }
            Some("job_description") => {
                form.job_description = Some(field.text().await.map_err(|e| AppError::Validation(e.to_string()))?)
            }
            _ => {}
        }
    }
    Ok(form)
}

/// POST /analyze (multipart: resume, job_description)
#[instrument(skip_all, fields(username = %session.username))]
pub async fn analyze(
    State(state): State<AppState>,
    session: Session,
    mp: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let form = read_upload(mp).await?;
    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation("resume is required".into()))?;
    let job_description = form.job_description.unwrap_or_default();
    let out = services::analyze_resume(&state, &session, resume, &job_description).await?;
    Ok(Json(out))
}

/// POST /ats-score (multipart: resume)
#[instrument(skip_all, fields(username = %session.username))]
pub async fn ats_score(
    State(state): State<AppState>,
    session: Session,
    mp: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let form = read_upload(mp).await?;
    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation("resume is required".into()))?;
    let out = services::check_ats_score(&state, &session, resume).await?;
    Ok(Json(out))
}

#[instrument(skip_all, fields(username = %session.username))]
pub async fn resume_builder(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ResumeForm>,
) -> Result<Json<ContentResponse>, AppError> {
    let content = services::build_resume(&state, &session, &form).await?;
    Ok(Json(ContentResponse { content }))
}

#[instrument(skip_all, fields(username = %session.username))]
pub async fn cover_letter(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    let content = services::generate_cover_letter(&state, &session, &req).await?;
    Ok(Json(ContentResponse { content }))
}

#[instrument(skip_all, fields(username = %session.username))]
pub async fn interview_prep(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<InterviewPrepRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    let content = services::generate_interview_prep(&state, &session, &req.job_role).await?;
    Ok(Json(ContentResponse { content }))
}

/// Render any text body (an analysis, a built resume) as a download.
#[instrument(skip_all, fields(username = %_session.username))]
pub async fn report(
    State(state): State<AppState>,
    _session: Session,
    Json(req): Json<ReportRequest>,
) -> Report {
    state.renderer.render(&req.title, &req.body)
}

pub async fn list_templates(_session: Session) -> Json<Vec<TemplateSummary>> {
    Json(
        templates::TEMPLATES
            .iter()
            .map(|t| TemplateSummary { name: t.name })
            .collect(),
    )
}

pub async fn get_template(
    _session: Session,
    Path(name): Path<String>,
) -> Result<Json<&'static templates::ResumeTemplate>, AppError> {
    templates::find(&name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("template '{name}'")))
}

pub async fn download_template(
    State(state): State<AppState>,
    _session: Session,
    Path(name): Path<String>,
) -> Result<Report, AppError> {
    let template =
        templates::find(&name).ok_or_else(|| AppError::NotFound(format!("template '{name}'")))?;
    Ok(state
        .renderer
        .render(&format!("{}_resume", template.name), template.body))
}
