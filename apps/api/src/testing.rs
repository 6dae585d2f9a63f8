//! Test doubles shared by the in-crate test modules.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, Rgb, RgbImage};

use crate::config::Config;
use crate::llm_client::{CompletionModel, CompletionRequest, LlmError};
use crate::review::extractor::{DocumentExtractor, ExtractError, PageRasterizer};
use crate::state::AppState;

/// A small deterministic gradient standing in for a rendered page.
pub fn sample_page() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(34, 44, |x, y| {
        Rgb([(x * 7) as u8, (y * 5) as u8, 200])
    }))
}

/// Counts calls and returns `sample_page()` (or an `InvalidPdf` error).
#[derive(Default)]
pub struct StubRasterizer {
    calls: AtomicUsize,
    fail: bool,
}

impl StubRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageRasterizer for StubRasterizer {
    fn render_first_page(&self, _pdf: &[u8]) -> Result<DynamicImage, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ExtractError::InvalidPdf("stub: malformed document".to_string()));
        }
        Ok(sample_page())
    }
}

/// A completion request as seen by `RecordingModel`.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub image_count: usize,
    pub mime_types: Vec<String>,
    pub job_description: String,
}

/// Records every request and answers with a canned reply keyed on the prompt.
#[derive(Default)]
pub struct RecordingModel {
    calls: Mutex<Vec<RecordedCall>>,
    fail_status: Option<u16>,
}

impl RecordingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_status: Some(status),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionModel for RecordingModel {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: request.prompt.to_string(),
            image_count: request.images.len(),
            mime_types: request.images.iter().map(|i| i.mime_type.clone()).collect(),
            job_description: request.job_description.to_string(),
        });

        if let Some(status) = self.fail_status {
            return Err(LlmError::Api {
                status,
                message: "stub outage".to_string(),
            });
        }

        let first_line = request.prompt.lines().next().unwrap_or_default();
        Ok(format!("Feedback for <{}>: {}", request.job_description, first_line))
    }

    fn model_name(&self) -> &str {
        "recording-stub"
    }
}

/// Application state wired to the given doubles.
pub fn test_state(rasterizer: Arc<StubRasterizer>, model: Arc<RecordingModel>) -> AppState {
    let config = Config::for_tests();
    AppState {
        extractor: DocumentExtractor::new(rasterizer, config.jpeg_quality),
        model,
        config,
    }
}
