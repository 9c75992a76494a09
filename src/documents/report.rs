use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// A downloadable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl IntoResponse for Report {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Produces a downloadable document from a text body.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, title: &str, body: &str) -> Report;
}

/// Plain UTF-8 text with normalized line endings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl ReportRenderer for PlainTextRenderer {
    fn render(&self, title: &str, body: &str) -> Report {
        let mut out = String::with_capacity(body.len() + 1);
        for line in body.lines() {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        Report {
            file_name: format!("{}.txt", file_stem(title)),
            content_type: "text/plain; charset=utf-8",
            bytes: Bytes::from(out),
        }
    }
}

// Keep file names header-safe.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "report".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_lines_and_file_name() {
        let report = PlainTextRenderer.render("resume_analysis", "a  \r\nb\n\nc");
        assert_eq!(report.file_name, "resume_analysis.txt");
        assert_eq!(&report.bytes[..], b"a\nb\n\nc\n");
    }

    #[test]
    fn sanitizes_file_names() {
        assert_eq!(file_stem("My Resume/\"x\""), "My_Resume___x_");
        assert_eq!(file_stem(""), "report");
    }

    #[test]
    fn response_is_an_attachment() {
        let res = PlainTextRenderer.render("Classic_resume", "body").into_response();
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Classic_resume.txt\""
        );
    }
}
