use bytes::Bytes;
use tracing::info;

use crate::{
    accounts::jwt::Session,
    errors::AppError,
    features::{
        dto::{AnalysisResponse, CoverLetterRequest, ResumeForm},
        prompts,
    },
    history::{repo as history, repo_types::Feature},
    scoring::extract_match_percentage,
    state::AppState,
};

/// Score a resume against a job description and record the result.
pub async fn analyze_resume(
    st: &AppState,
    session: &Session,
    resume: Bytes,
    job_description: &str,
) -> Result<AnalysisResponse, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation("job_description is required".into()));
    }
    score_resume(st, session, resume, job_description, Feature::Analyzer).await
}

/// Score a resume against the generic posting and record the result.
pub async fn check_ats_score(
    st: &AppState,
    session: &Session,
    resume: Bytes,
) -> Result<AnalysisResponse, AppError> {
    score_resume(st, session, resume, prompts::GENERIC_JOB_DESCRIPTION, Feature::AtsScore).await
}

async fn score_resume(
    st: &AppState,
    session: &Session,
    resume: Bytes,
    job_description: &str,
    feature: Feature,
) -> Result<AnalysisResponse, AppError> {
    if resume.is_empty() {
        return Err(AppError::Validation("resume is required".into()));
    }
    let resume_text = st.extractor.extract(resume).await?;
    let prompt = prompts::analysis(&st.config.llm.prompt, &resume_text, job_description);
    let analysis = st.generator.generate(&prompt).await?;
    let score = extract_match_percentage(&analysis);

    history::append(&st.db, &session.username, feature, score, &analysis).await?;
    info!(username = %session.username, %feature, ?score, "resume scored");
    Ok(AnalysisResponse { score, analysis })
}

pub fn render_resume(form: &ResumeForm) -> String {
    format!(
        "{}\n{} | {}\n\nEducation:\n{}\n\nSkills:\n{}\n\nProjects:\n{}\n",
        form.name.trim(),
        form.email.trim(),
        form.phone.trim(),
        form.education.trim(),
        form.skills.trim(),
        form.projects.trim(),
    )
}

pub async fn build_resume(
    st: &AppState,
    session: &Session,
    form: &ResumeForm,
) -> Result<String, AppError> {
    let content = render_resume(form);
    history::append(&st.db, &session.username, Feature::ResumeBuilder, None, &content).await?;
    Ok(content)
}

pub async fn generate_cover_letter(
    st: &AppState,
    session: &Session,
    req: &CoverLetterRequest,
) -> Result<String, AppError> {
    if req.job_title.trim().is_empty() || req.company.trim().is_empty() {
        return Err(AppError::Validation("job_title and company are required".into()));
    }
    let prompt = prompts::cover_letter(req.job_title.trim(), req.company.trim(), req.skills.trim());
    let letter = st.generator.generate(&prompt).await?;
    history::append(&st.db, &session.username, Feature::CoverLetter, None, &letter).await?;
    Ok(letter)
}

pub async fn generate_interview_prep(
    st: &AppState,
    session: &Session,
    job_role: &str,
) -> Result<String, AppError> {
    if job_role.trim().is_empty() {
        return Err(AppError::Validation("job_role is required".into()));
    }
    let qa = st.generator.generate(&prompts::interview_prep(job_role.trim())).await?;
    history::append(&st.db, &session.username, Feature::InterviewPrep, None, &qa).await?;
    Ok(qa)
}
