mod config;
mod errors;
mod llm_client;
mod models;
mod review;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionModel, GeminiClient};
use crate::review::extractor::{DocumentExtractor, PdfiumRasterizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS Review v{}", env!("CARGO_PKG_VERSION"));

    // Initialize model client
    let model = GeminiClient::new(&config).context("Failed to build the Gemini HTTP client")?;
    info!("LLM client initialized (model: {})", model.model_name());

    // pdfium is bound per render on the blocking pool
    let rasterizer = PdfiumRasterizer::new(config.pdfium_lib_dir.clone(), config.render_scale);
    let extractor = DocumentExtractor::new(Arc::new(rasterizer), config.jpeg_quality);
    info!(
        "Extractor initialized (scale {}, jpeg quality {}, pdfium {})",
        config.render_scale,
        config.jpeg_quality,
        config
            .pdfium_lib_dir
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "system library".to_string())
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        extractor,
        model: Arc::new(model),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the API has real clients

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
