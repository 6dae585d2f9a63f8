//! Multipart form parsing for the review form and the JSON review API.

use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

use crate::errors::AppError;
use crate::models::payload::{Submission, UploadedResume};

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const RESUME_FIELD: &str = "resume";
pub const ACTION_FIELD: &str = "action";

/// Form values plus the raw `action` button value, if one was sent.
#[derive(Debug, Default)]
pub struct ReviewForm {
    pub submission: Submission,
    pub action: Option<String>,
}

/// Reads all fields of a review form. An empty file part (no file chosen)
/// yields `resume: None`.
pub async fn read_review_form(
    multipart: &mut Multipart,
    max_file_bytes: usize,
) -> Result<ReviewForm, AppError> {
    let mut form = ReviewForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            JOB_DESCRIPTION_FIELD => {
                form.submission.job_description = field.text().await.map_err(multipart_error)?;
            }
            ACTION_FIELD => {
                form.action = Some(field.text().await.map_err(multipart_error)?);
            }
            RESUME_FIELD => {
                form.submission.resume = read_resume(field, max_file_bytes).await?;
            }
            _ => {
                debug!("Ignoring unexpected form field '{field_name}'");
                let _ = field.bytes().await.map_err(multipart_error)?;
            }
        }
    }

    Ok(form)
}

async fn read_resume(
    field: Field<'_>,
    max_file_bytes: usize,
) -> Result<Option<UploadedResume>, AppError> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    if bytes.is_empty() {
        return Ok(None);
    }

    if bytes.len() > max_file_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Resume is {} bytes; the maximum is {max_file_bytes} bytes",
            bytes.len()
        )));
    }

    if !looks_like_pdf(&file_name, content_type.as_deref(), &bytes) {
        return Err(AppError::Validation(
            "Invalid file type. Only PDF resumes are accepted".to_string(),
        ));
    }

    Ok(Some(UploadedResume {
        file_name: if file_name.is_empty() {
            "resume.pdf".to_string()
        } else {
            file_name
        },
        content_type,
        bytes,
    }))
}

/// Accepts a `.pdf` extension, an `application/pdf` content type, or `%PDF` magic bytes.
pub fn looks_like_pdf(file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> bool {
    let has_pdf_extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    let has_pdf_content_type =
        content_type.is_some_and(|ct| ct.trim().eq_ignore_ascii_case("application/pdf"));

    has_pdf_extension || has_pdf_content_type || bytes.starts_with(b"%PDF")
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Malformed form submission: {}", err.body_text()))
    }
}
