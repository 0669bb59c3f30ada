//! Page event handlers: render, file selected, job description edited, submit, export.
//!
//! Extraction and analysis run in spawned tasks so a dropped browser connection cannot
//! strand the session in a busy state.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::analyze_resume;
use crate::errors::AppError;
use crate::export::{ExportError, EXPORT_FILE_NAME};
use crate::render::render_page;
use crate::session::SessionError;
use crate::state::AppState;

/// Multipart field carrying the resume upload.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct JobDescriptionForm {
    #[serde(default)]
    pub job_description: Option<String>,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = state.session.lock().await.view();
    Ok(Html(render_page(view, state.exporter.is_some())?))
}

/// POST /resume
///
/// Starts extraction of the uploaded file and waits for it. A post without a file
/// leaves the session untouched.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes));
        break;
    }

    let Some((file_name, bytes)) = upload.filter(|(name, _)| !name.is_empty()) else {
        return Ok(Redirect::to("/"));
    };

    let ticket = state.session.lock().await.begin_parsing(&file_name)?;
    info!("Parsing upload {file_name} ({} bytes)", bytes.len());

    let task_state = state.clone();
    tokio::spawn(async move {
        let outcome = task_state.extractor.extract(ticket.file_name(), bytes).await;
        task_state.session.lock().await.finish_parsing(ticket, outcome);
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?;

    Ok(Redirect::to("/"))
}

/// POST /job-description
pub async fn handle_job_description(
    State(state): State<AppState>,
    Form(form): Form<JobDescriptionForm>,
) -> Redirect {
    if let Some(text) = form.job_description {
        state.session.lock().await.set_job_description(&text);
    }
    Redirect::to("/")
}

/// POST /analyze
///
/// Stores the submitted job description, then runs exactly one analysis. Blank inputs
/// end in the validation banner without a completion call; a submit while busy is a 409.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Form(form): Form<JobDescriptionForm>,
) -> Result<Redirect, AppError> {
    let ticket = {
        let mut session = state.session.lock().await;
        if let Some(text) = &form.job_description {
            session.set_job_description(text);
        }
        match session.begin_analysis() {
            Ok(ticket) => ticket,
            Err(SessionError::Validation(_)) => return Ok(Redirect::to("/")),
            Err(busy) => return Err(busy.into()),
        }
    };

    let task_state = state.clone();
    tokio::spawn(async move {
        let outcome = analyze_resume(task_state.completion.as_ref(), ticket.request()).await;
        task_state.session.lock().await.finish_analysis(ticket, outcome);
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))?;

    Ok(Redirect::to("/"))
}

/// GET /export
///
/// Downloads the improved resume as a PDF. Never mutates the session.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let exporter = state.exporter.clone().ok_or(ExportError::Unavailable)?;
    let improved_resume = state
        .session
        .lock()
        .await
        .result()
        .map(|r| r.improved_resume.clone())
        .ok_or(ExportError::NoResult)?;

    let bytes = tokio::task::spawn_blocking(move || exporter.export(&improved_resume))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("export task failed: {e}")))??;

    info!("Exported improved resume ({} bytes)", bytes.len());
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
