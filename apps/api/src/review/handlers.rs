//! Axum route handlers for the review form and the review API.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::review::controller::{run_review, ReviewOutcome};
use crate::review::form::{read_review_form, ReviewForm};
use crate::review::page::IndexPage;
use crate::review::ReviewAction;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub request_id: Uuid,
    pub action: ReviewAction,
    pub title: &'static str,
    pub heading: &'static str,
    pub feedback: String,
}

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    Ok(Html(IndexPage::blank().render()?))
}

/// POST /review
///
/// Form submission from the page. Always answers with the page itself:
/// success, warning, or error banner, with the job description preserved.
pub async fn handle_review_form(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match read_review_form(&mut multipart, state.config.max_upload_bytes).await {
        Ok(form) => form,
        Err(err) => return render_error(String::new(), None, err),
    };

    let ReviewForm { submission, action } = form;
    let uploaded_file = submission.resume_file_name().map(str::to_string);

    let action = match parse_action(action.as_deref()) {
        Ok(action) => action,
        Err(err) => return render_error(submission.job_description, uploaded_file, err),
    };

    match run_review(&state.extractor, state.model.as_ref(), &submission, action).await {
        Ok(outcome) => {
            let status = match outcome {
                ReviewOutcome::Completed(_) => StatusCode::OK,
                ReviewOutcome::MissingResume { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            };
            let page = IndexPage::with_outcome(submission.job_description, uploaded_file, outcome);
            render_page(status, page)
        }
        Err(err) => render_error(submission.job_description, uploaded_file, err.into()),
    }
}

/// POST /api/v1/review/:action
///
/// Same review as the form, answered as JSON. A missing resume is a 422.
pub async fn handle_review_api(
    State(state): State<AppState>,
    Path(action): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ReviewResponse>, AppError> {
    let action = parse_action(Some(&action))?;
    let ReviewForm { submission, .. } =
        read_review_form(&mut multipart, state.config.max_upload_bytes).await?;

    match run_review(&state.extractor, state.model.as_ref(), &submission, action).await? {
        ReviewOutcome::Completed(result) => Ok(Json(ReviewResponse {
            request_id: result.request_id,
            action: result.action,
            title: result.action.success_title(),
            heading: result.action.result_heading(),
            feedback: result.feedback,
        })),
        ReviewOutcome::MissingResume { warning } => {
            Err(AppError::MissingResume(warning.to_string()))
        }
    }
}

fn parse_action(raw: Option<&str>) -> Result<ReviewAction, AppError> {
    let raw = raw.ok_or_else(|| AppError::Validation("No review action selected".to_string()))?;
    raw.parse::<ReviewAction>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

fn render_error(job_description: String, uploaded_file: Option<String>, err: AppError) -> Response {
    let (status, _, message) = err.parts();
    render_page(
        status,
        IndexPage::with_error(job_description, uploaded_file, message),
    )
}

fn render_page(status: StatusCode, page: IndexPage) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
