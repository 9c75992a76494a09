use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

/// Stored in the `score` column when a feature produces no score.
pub const NO_SCORE: &str = "N/A";

/// User-facing actions that leave a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Analyzer,
    AtsScore,
    ResumeBuilder,
    CoverLetter,
    InterviewPrep,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Analyzer => "Analyzer",
            Feature::AtsScore => "ATS Score",
            Feature::ResumeBuilder => "Resume Builder",
            Feature::CoverLetter => "Cover Letter",
            Feature::InterviewPrep => "Interview Prep",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw `history` row. `score` is opaque text in storage.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct HistoryRow {
    pub username: String,
    pub feature: Option<String>,
    pub score: Option<String>,
    pub details: Option<String>,
}

/// One immutable record of a past feature invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub username: String,
    pub feature: String,
    pub score: Option<u8>,
    pub details: String,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            username: row.username,
            feature: row.feature.unwrap_or_default(),
            score: row.score.as_deref().and_then(decode_score),
            details: row.details.unwrap_or_default(),
        }
    }
}

pub(crate) fn encode_score(score: Option<u8>) -> String {
    match score {
        Some(v) => v.to_string(),
        None => NO_SCORE.to_string(),
    }
}

// Anything other than an in-range integer (the sentinel, legacy "None") reads as absent.
fn decode_score(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|v| *v <= 100)
}
