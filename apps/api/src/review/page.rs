//! The single HTML page: form, banners and model output.

use askama::Template;

use crate::review::controller::{ReviewOutcome, ReviewResult};
use crate::review::ReviewAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ResultView {
    pub heading: &'static str,
    pub level: NoticeLevel,
    pub feedback: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    /// Echoed back into the text area so the user can re-submit.
    pub job_description: String,
    pub uploaded_file: Option<String>,
    pub notice: Option<Notice>,
    pub result: Option<ResultView>,
}

impl IndexPage {
    pub fn blank() -> Self {
        Self {
            job_description: String::new(),
            uploaded_file: None,
            notice: None,
            result: None,
        }
    }

    pub fn with_outcome(
        job_description: String,
        uploaded_file: Option<String>,
        outcome: ReviewOutcome,
    ) -> Self {
        let (notice, result) = match outcome {
            ReviewOutcome::Completed(result) => (
                Some(Notice {
                    level: NoticeLevel::Success,
                    message: result.action.success_title().to_string(),
                }),
                Some(result_view(result)),
            ),
            ReviewOutcome::MissingResume { warning } => (
                Some(Notice {
                    level: NoticeLevel::Warning,
                    message: warning.to_string(),
                }),
                None,
            ),
        };

        Self {
            job_description,
            uploaded_file,
            notice,
            result,
        }
    }

    pub fn with_error(
        job_description: String,
        uploaded_file: Option<String>,
        message: String,
    ) -> Self {
        Self {
            job_description,
            uploaded_file,
            notice: Some(Notice {
                level: NoticeLevel::Error,
                message,
            }),
            result: None,
        }
    }
}

fn result_view(result: ReviewResult) -> ResultView {
    // Analysis reads as an info panel, the score as a success panel.
    let level = match result.action {
        ReviewAction::Analyze => NoticeLevel::Info,
        ReviewAction::Match => NoticeLevel::Success,
    };
    ResultView {
        heading: result.action.result_heading(),
        level,
        feedback: result.feedback,
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_blank_page_has_form_and_both_buttons() {
        let html = IndexPage::blank().render().unwrap();
        assert!(html.contains(r#"name="job_description""#));
        assert!(html.contains(r#"name="resume""#));
        assert!(html.contains(r#"value="analyze""#));
        assert!(html.contains(r#"value="match""#));
        assert!(!html.contains("class=\"banner"));
    }

    #[test]
    fn test_completed_outcome_renders_success_and_feedback() {
        let outcome = ReviewOutcome::Completed(ReviewResult {
            request_id: Uuid::new_v4(),
            action: ReviewAction::Match,
            feedback: "Match percentage: 80%".to_string(),
        });
        let html = IndexPage::with_outcome(
            "Rust role".to_string(),
            Some("cv.pdf".to_string()),
            outcome,
        )
        .render()
        .unwrap();

        assert!(html.contains("Match Score Ready"));
        assert!(html.contains("Results"));
        assert!(html.contains("Match percentage: 80%"));
        assert!(html.contains("cv.pdf"));
        assert!(html.contains("Rust role"));
    }

    #[test]
    fn test_missing_resume_renders_warning() {
        let outcome = ReviewOutcome::MissingResume {
            warning: ReviewAction::Analyze.missing_resume_warning(),
        };
        let html = IndexPage::with_outcome(String::new(), None, outcome)
            .render()
            .unwrap();
        assert!(html.contains("banner warning"));
        assert!(html.contains("Please upload your resume to analyze."));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = IndexPage::with_error(
            "<script>alert(1)</script>".to_string(),
            None,
            "bad <b>pdf</b>".to_string(),
        )
        .render()
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("banner error"));
    }
}
