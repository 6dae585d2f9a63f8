//! Form controller: one submission, one action, one outcome.
//!
//! Idle → action → resume present? extract + complete : warn → Idle.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm_client::{CompletionModel, CompletionRequest, LlmError};
use crate::models::payload::Submission;
use crate::review::extractor::{DocumentExtractor, ExtractError};
use crate::review::ReviewAction;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Completion(#[from] LlmError),
}

/// Model feedback for one action.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub request_id: Uuid,
    pub action: ReviewAction,
    pub feedback: String,
}

#[derive(Debug, Clone)]
pub enum ReviewOutcome {
    Completed(ReviewResult),
    /// No resume was uploaded. Neither the extractor nor the model ran.
    MissingResume { warning: &'static str },
}

/// Runs a single review. Pure apart from the two injected collaborators.
pub async fn run_review(
    extractor: &DocumentExtractor,
    model: &dyn CompletionModel,
    submission: &Submission,
    action: ReviewAction,
) -> Result<ReviewOutcome, ReviewError> {
    let request_id = Uuid::new_v4();

    let Some(resume) = submission.uploaded_resume() else {
        warn!(%request_id, %action, "Review requested without a resume");
        return Ok(ReviewOutcome::MissingResume {
            warning: action.missing_resume_warning(),
        });
    };

    info!(
        %request_id,
        %action,
        file = %resume.file_name,
        content_type = resume.content_type.as_deref().unwrap_or("unknown"),
        bytes = resume.bytes.len(),
        model = model.model_name(),
        "Starting resume review"
    );

    let images = extractor.extract(Some(resume.bytes.clone())).await?;

    let feedback = model
        .complete(CompletionRequest {
            prompt: action.prompt(),
            images: &images,
            job_description: &submission.job_description,
        })
        .await?;

    info!(%request_id, %action, chars = feedback.len(), "Review complete");

    Ok(ReviewOutcome::Completed(ReviewResult {
        request_id,
        action,
        feedback,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;

    use super::*;
    use crate::models::payload::UploadedResume;
    use crate::review::prompts::{ANALYZE_PROMPT, MATCH_PROMPT};
    use crate::testing::{RecordingModel, StubRasterizer};

    const JD: &str = "Looking for a Python backend engineer";

    fn submission_with_resume() -> Submission {
        Submission {
            job_description: JD.to_string(),
            resume: Some(UploadedResume {
                file_name: "resume.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                bytes: Bytes::from_static(b"%PDF-1.4 one page"),
            }),
        }
    }

    fn fixtures() -> (Arc<StubRasterizer>, DocumentExtractor, RecordingModel) {
        let rasterizer = Arc::new(StubRasterizer::new());
        let extractor = DocumentExtractor::new(rasterizer.clone(), 85);
        (rasterizer, extractor, RecordingModel::new())
    }

    #[tokio::test]
    async fn test_missing_resume_warns_without_calls() {
        let (rasterizer, extractor, model) = fixtures();
        let submission = Submission {
            job_description: "anything".to_string(),
            resume: None,
        };

        for action in [ReviewAction::Analyze, ReviewAction::Match] {
            let outcome = run_review(&extractor, &model, &submission, action)
                .await
                .unwrap();
            match outcome {
                ReviewOutcome::MissingResume { warning } => {
                    assert_eq!(warning, action.missing_resume_warning())
                }
                other => panic!("expected warning, got {other:?}"),
            }
        }

        assert_eq!(rasterizer.calls(), 0);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_upload_counts_as_missing() {
        let (rasterizer, extractor, model) = fixtures();
        let mut submission = submission_with_resume();
        if let Some(resume) = submission.resume.as_mut() {
            resume.bytes = Bytes::new();
        }

        let outcome = run_review(&extractor, &model, &submission, ReviewAction::Match)
            .await
            .unwrap();

        assert!(matches!(outcome, ReviewOutcome::MissingResume { .. }));
        assert_eq!(rasterizer.calls(), 0);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_and_match_use_their_own_prompts() {
        let (_, extractor, model) = fixtures();
        let submission = submission_with_resume();

        let analyze = run_review(&extractor, &model, &submission, ReviewAction::Analyze)
            .await
            .unwrap();
        let matched = run_review(&extractor, &model, &submission, ReviewAction::Match)
            .await
            .unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].prompt, ANALYZE_PROMPT);
        assert_eq!(calls[1].prompt, MATCH_PROMPT);

        for call in &calls {
            assert_eq!(call.image_count, 1);
            assert_eq!(call.mime_types, vec!["image/jpeg".to_string()]);
            assert_eq!(call.job_description, JD);
        }

        let (ReviewOutcome::Completed(a), ReviewOutcome::Completed(m)) = (analyze, matched) else {
            panic!("both reviews should complete");
        };
        assert_eq!(a.action, ReviewAction::Analyze);
        assert_eq!(m.action, ReviewAction::Match);
        assert!(!a.feedback.is_empty());
        assert!(!m.feedback.is_empty());
        assert_ne!(a.feedback, m.feedback);
        assert_ne!(a.request_id, m.request_id);
    }

    #[tokio::test]
    async fn test_extraction_failure_skips_model() {
        let rasterizer = Arc::new(StubRasterizer::failing());
        let extractor = DocumentExtractor::new(rasterizer.clone(), 85);
        let model = RecordingModel::new();

        let result = run_review(
            &extractor,
            &model,
            &submission_with_resume(),
            ReviewAction::Analyze,
        )
        .await;

        assert!(matches!(
            result,
            Err(ReviewError::Extraction(ExtractError::InvalidPdf(_)))
        ));
        assert_eq!(rasterizer.calls(), 1);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_model_failure_is_surfaced() {
        let (_, extractor, _) = fixtures();
        let model = RecordingModel::failing(503);

        let result = run_review(
            &extractor,
            &model,
            &submission_with_resume(),
            ReviewAction::Match,
        )
        .await;

        assert!(matches!(
            result,
            Err(ReviewError::Completion(LlmError::Api { status: 503, .. }))
        ));
        assert_eq!(model.call_count(), 1);
    }
}
