mod analysis;
mod config;
mod errors;
mod export;
mod extraction;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::pdf::PdfResumeExporter;
use crate::export::ResumeExporter;
use crate::extraction::FileTextExtractor;
use crate::llm_client::{CompletionService, GeminiClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Coach v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let completion: Arc<dyn CompletionService> = Arc::new(GeminiClient::new(
        config.api_key.clone(),
        config.api_base.clone(),
        config.model.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?);
    info!("Completion client initialized (model: {})", completion.model());

    let extractor = FileTextExtractor::with_defaults(config.enable_docx);
    if !config.enable_docx {
        warn!("DOCX extraction disabled; Word uploads will be rejected");
    }

    let exporter: Option<Arc<dyn ResumeExporter>> = if config.enable_pdf_export {
        Some(Arc::new(PdfResumeExporter::default()))
    } else {
        warn!("PDF export disabled");
        None
    };

    let state = AppState::new(completion, extractor, exporter);

    let app = build_router(state, config.max_upload_bytes).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
