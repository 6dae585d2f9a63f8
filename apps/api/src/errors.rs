use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::review::controller::ReviewError;
use crate::review::extractor::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Missing resume: {0}")]
    MissingResume(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Extraction(e) => e.into(),
            ReviewError::Completion(e) => e.into(),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match &err {
            ExtractError::MissingInput => AppError::MissingResume(err.to_string()),
            ExtractError::InvalidPdf(_) | ExtractError::EmptyDocument => {
                AppError::InvalidPdf(err.to_string())
            }
            ExtractError::Engine(_)
            | ExtractError::Rasterization(_)
            | ExtractError::Encode(_)
            | ExtractError::Task(_) => AppError::Extraction(err.to_string()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Llm(err.to_string())
    }
}

impl AppError {
    /// Status, machine code and user-facing message. Server-side faults are
    /// logged here and replaced by a generic message.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::MissingResume(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_RESUME",
                msg.clone(),
            ),
            AppError::InvalidPdf(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_PDF",
                format!("The uploaded file could not be read as a PDF. {msg}"),
            ),
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    "The resume page could not be rendered".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "The AI model could not produce feedback. Please try again.".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
