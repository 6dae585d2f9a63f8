//! Document-to-image extraction: first PDF page → JPEG → base64 `ImagePayload`.
//!
//! Rasterisation is CPU-bound and pdfium keeps thread-local state, so the async
//! entry point moves the work onto the blocking pool via `spawn_blocking`.

use std::path::PathBuf;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use pdfium_render::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::models::payload::{ImagePayload, PAGE_MIME_TYPE};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No resume file was uploaded")]
    MissingInput,

    #[error("Could not load the PDF engine: {0}")]
    Engine(String),

    #[error("Could not read the PDF: {0}")]
    InvalidPdf(String),

    #[error("The PDF has no pages")]
    EmptyDocument,

    #[error("Failed to rasterise page 1: {0}")]
    Rasterization(String),

    #[error("Failed to encode page image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Render task failed: {0}")]
    Task(String),
}

/// Renders page one of a PDF to a bitmap.
pub trait PageRasterizer: Send + Sync {
    fn render_first_page(&self, pdf: &[u8]) -> Result<DynamicImage, ExtractError>;
}

/// `PageRasterizer` backed by the pdfium C++ library.
pub struct PdfiumRasterizer {
    lib_dir: Option<PathBuf>,
    scale: f32,
}

impl PdfiumRasterizer {
    pub fn new(lib_dir: Option<PathBuf>, scale: f32) -> Self {
        Self { lib_dir, scale }
    }

    fn bind(&self) -> Result<Pdfium, ExtractError> {
        let bindings = match &self.lib_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| ExtractError::Engine(format!("{e:?}")))?;

        Ok(Pdfium::new(bindings))
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn render_first_page(&self, pdf: &[u8]) -> Result<DynamicImage, ExtractError> {
        let pdfium = self.bind()?;

        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| ExtractError::InvalidPdf(format!("{e:?}")))?;

        let pages = document.pages();
        if pages.len() == 0 {
            return Err(ExtractError::EmptyDocument);
        }
        debug!("PDF loaded: {} pages", pages.len());

        let page = pages
            .get(0)
            .map_err(|e| ExtractError::Rasterization(format!("{e:?}")))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(self.scale);
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| ExtractError::Rasterization(format!("{e:?}")))?;

        Ok(bitmap.as_image())
    }
}

/// JPEG-encodes a page raster and wraps it as a base64 payload.
pub fn encode_page(image: &DynamicImage, quality: u8) -> Result<ImagePayload, ExtractError> {
    // JPEG has no alpha channel; pdfium hands back RGBA.
    let rgb = image.to_rgb8();

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(&rgb)?;

    let data = STANDARD.encode(&buf);
    debug!(
        "Encoded {}x{} page → {} bytes base64",
        rgb.width(),
        rgb.height(),
        data.len()
    );

    Ok(ImagePayload {
        mime_type: PAGE_MIME_TYPE.to_string(),
        data,
    })
}

/// Extracts page one of `pdf` as a single-element payload collection.
///
/// Absent or empty input fails with `MissingInput` before the rasterizer is touched.
pub fn extract_first_page(
    rasterizer: &dyn PageRasterizer,
    pdf: Option<&[u8]>,
    jpeg_quality: u8,
) -> Result<Vec<ImagePayload>, ExtractError> {
    let pdf = pdf
        .filter(|bytes| !bytes.is_empty())
        .ok_or(ExtractError::MissingInput)?;

    let image = rasterizer.render_first_page(pdf)?;
    debug!("Rendered page 1 → {}x{} px", image.width(), image.height());

    Ok(vec![encode_page(&image, jpeg_quality)?])
}

/// Shared extractor handle held in `AppState`.
#[derive(Clone)]
pub struct DocumentExtractor {
    rasterizer: Arc<dyn PageRasterizer>,
    jpeg_quality: u8,
}

impl DocumentExtractor {
    pub fn new(rasterizer: Arc<dyn PageRasterizer>, jpeg_quality: u8) -> Self {
        Self {
            rasterizer,
            jpeg_quality,
        }
    }

    /// Runs `extract_first_page` on the blocking thread pool.
    pub async fn extract(&self, pdf: Option<Bytes>) -> Result<Vec<ImagePayload>, ExtractError> {
        let pdf = pdf
            .filter(|bytes| !bytes.is_empty())
            .ok_or(ExtractError::MissingInput)?;
        let rasterizer = Arc::clone(&self.rasterizer);
        let quality = self.jpeg_quality;

        tokio::task::spawn_blocking(move || {
            extract_first_page(rasterizer.as_ref(), Some(pdf.as_ref()), quality)
        })
        .await
        .map_err(|e| ExtractError::Task(format!("Render task panicked: {e}")))?
    }
}
