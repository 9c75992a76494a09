use serde::{Deserialize, Serialize};

/// Result of resume analysis or ATS scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResponse {
    pub score: Option<u8>,
    pub analysis: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResumeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub projects: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub skills: String,
}

#[derive(Debug, Deserialize)]
pub struct InterviewPrepRequest {
    pub job_role: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default = "default_report_title", alias = "name")]
    pub title: String,
    pub body: String,
}
fn default_report_title() -> String { "report".into() }

/// Generated or assembled text returned by the builder, cover-letter and
/// interview features.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub name: &'static str,
}
