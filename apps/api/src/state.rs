use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionModel;
use crate::review::extractor::DocumentExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every request works on its own `Submission`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: DocumentExtractor,
    /// Pluggable completion backend. Default: `GeminiClient`.
    pub model: Arc<dyn CompletionModel>,
}
