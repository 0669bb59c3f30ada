use std::sync::Arc;

use tokio::sync::Mutex;

use crate::export::ResumeExporter;
use crate::extraction::FileTextExtractor;
use crate::llm_client::CompletionService;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single page session. Locked only for state transitions, never across an await
    /// on extraction or the completion service.
    pub session: Arc<Mutex<Session>>,
    pub completion: Arc<dyn CompletionService>,
    pub extractor: FileTextExtractor,
    /// `None` when PDF export is disabled.
    pub exporter: Option<Arc<dyn ResumeExporter>>,
}

impl AppState {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        extractor: FileTextExtractor,
        exporter: Option<Arc<dyn ResumeExporter>>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            completion,
            extractor,
            exporter,
        }
    }
}
