/// Job description used when scoring a resume without a specific posting.
pub const GENERIC_JOB_DESCRIPTION: &str = "Generic Job Description for ATS Check";

pub fn analysis(instruction: &str, resume_text: &str, job_description: &str) -> String {
    format!("{instruction}\n\nResume: {resume_text}\n\nJob Description: {job_description}")
}

pub fn cover_letter(job_title: &str, company: &str, skills: &str) -> String {
    format!(
        "Write a professional cover letter for {job_title} role at {company}, highlighting skills: {skills}."
    )
}

pub fn interview_prep(job_role: &str) -> String {
    format!("Generate 5 common interview questions and answers for {job_role}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_layout() {
        assert_eq!(
            analysis("Rate it.", "RUST DEV", "Needs Rust"),
            "Rate it.\n\nResume: RUST DEV\n\nJob Description: Needs Rust"
        );
    }

    #[test]
    fn cover_letter_mentions_inputs() {
        let p = cover_letter("Backend Engineer", "Acme", "Rust, SQL");
        assert_eq!(
            p,
            "Write a professional cover letter for Backend Engineer role at Acme, highlighting skills: Rust, SQL."
        );
    }
}
