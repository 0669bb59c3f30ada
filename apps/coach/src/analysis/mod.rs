//! Resume analysis: prompt, structured-output call, fence stripping, validation.
//! All completion calls go through `llm_client::CompletionService`.

pub mod prompts;

use thiserror::Error;
use tracing::{error, info};

use crate::llm_client::schema::analysis_response_schema;
use crate::llm_client::{strip_json_fences, CompletionRequest, CompletionService, LlmError};
use crate::models::analysis::{AnalysisRequest, AnalysisResult};
use prompts::{build_prompt, ANALYSIS_TEMPERATURE};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("The AI returned an invalid response format. Please try again.")]
    InvalidResponseFormat(#[source] serde_json::Error),

    #[error("Completion service error: {0}")]
    Transport(#[from] LlmError),
}

/// Runs one analysis against the injected completion service.
///
/// Exactly one request is sent. A response that does not parse and validate as an
/// `AnalysisResult` fails with `InvalidResponseFormat`; nothing is retried.
pub async fn analyze_resume(
    service: &dyn CompletionService,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AnalysisError> {
    let completion = CompletionRequest {
        prompt: build_prompt(request.resume_text(), request.job_description()),
        response_schema: analysis_response_schema(),
        temperature: ANALYSIS_TEMPERATURE,
    };

    info!(
        "Requesting analysis: model={}, resume_chars={}, jd_chars={}",
        service.model(),
        request.resume_text().len(),
        request.job_description().len()
    );

    let raw = service.complete(&completion).await?;
    let result = parse_analysis(&raw)?;

    info!(
        "Analysis complete: score={}, strengths={}, improvements={}",
        result.match_score,
        result.strengths.len(),
        result.areas_for_improvement.len()
    );
    Ok(result)
}

/// Parses raw model output, tolerating a markdown code fence around the JSON.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    let cleaned = strip_json_fences(raw);
    serde_json::from_str::<AnalysisResult>(cleaned).map_err(|e| {
        error!(raw = %raw.trim(), "Failed to parse completion response: {e}");
        AnalysisError::InvalidResponseFormat(e)
    })
}
