//! Form session: the page's transient state as an explicit state machine.
//!
//! Long-running steps are bracketed by `begin_*` / `finish_*`. A `begin_*` call hands out a
//! move-only ticket that the matching `finish_*` consumes, so a completion can only be applied
//! to the step that started it. While a step is in flight every `begin_*` is refused.

use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::AnalysisError;
use crate::extraction::ExtractionError;
use crate::models::analysis::{AnalysisRequest, AnalysisResult, ValidationError};

pub const ANALYSIS_FAILED_MESSAGE: &str =
    "An error occurred during analysis. Please check your console or try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    ParsingFile,
    ReadyToAnalyze,
    Analyzing,
    ShowingResult(AnalysisResult),
    ShowingError(String),
}

impl FormState {
    /// True while extraction or analysis is outstanding; submission is disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, FormState::ParsingFile | FormState::Analyzing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormState::Idle => "idle",
            FormState::ParsingFile => "parsing_file",
            FormState::ReadyToAnalyze => "ready_to_analyze",
            FormState::Analyzing => "analyzing",
            FormState::ShowingResult(_) => "showing_result",
            FormState::ShowingError(_) => "showing_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A file is still being processed.")]
    ParsingInProgress,

    #[error("An analysis is already in progress.")]
    AnalysisInProgress,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Proof that a file extraction was started. Consumed by `finish_parsing`.
#[derive(Debug)]
#[must_use]
pub struct ParseTicket {
    file_name: String,
}

impl ParseTicket {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Proof that an analysis was started, carrying the inputs snapshot.
#[derive(Debug)]
#[must_use]
pub struct AnalysisTicket {
    request: AnalysisRequest,
}

impl AnalysisTicket {
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }
}

/// Read-only snapshot used by the renderer.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub file_name: String,
    pub resume_chars: usize,
    pub job_description: String,
    pub state: FormState,
}

#[derive(Debug, Default)]
pub struct Session {
    file_name: String,
    resume_text: String,
    job_description: String,
    state: FormState,
}

impl Session {
    #[cfg(test)]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            FormState::ShowingResult(result) => Some(result),
            _ => None,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            file_name: self.file_name.clone(),
            resume_chars: self.resume_text.chars().count(),
            job_description: self.job_description.clone(),
            state: self.state.clone(),
        }
    }

    /// A new file was selected. Clears the previous text, result and error.
    pub fn begin_parsing(&mut self, file_name: &str) -> Result<ParseTicket, SessionError> {
        self.ensure_idle()?;
        self.file_name = file_name.to_string();
        self.resume_text.clear();
        self.transition(FormState::ParsingFile);
        Ok(ParseTicket {
            file_name: file_name.to_string(),
        })
    }

    pub fn finish_parsing(&mut self, ticket: ParseTicket, outcome: Result<String, ExtractionError>) {
        match outcome {
            Ok(text) => {
                self.resume_text = text;
                let next = self.input_state();
                self.transition(next);
            }
            Err(e) => {
                warn!("Extraction of {} failed: {e}", ticket.file_name);
                self.file_name.clear();
                self.resume_text.clear();
                self.transition(FormState::ShowingError(e.to_string()));
            }
        }
    }

    /// Job-description edits are accepted in every state.
    pub fn set_job_description(&mut self, text: &str) {
        self.job_description = text.to_string();
        if matches!(self.state, FormState::Idle | FormState::ReadyToAnalyze) {
            let next = self.input_state();
            self.transition(next);
        }
    }

    /// Submit pressed. Refused while busy; blank inputs show the validation message
    /// and start nothing.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, SessionError> {
        self.ensure_idle()?;
        let request = match AnalysisRequest::new(
            self.resume_text.clone(),
            self.job_description.clone(),
        ) {
            Ok(request) => request,
            Err(e) => {
                self.transition(FormState::ShowingError(e.to_string()));
                return Err(e.into());
            }
        };
        self.transition(FormState::Analyzing);
        Ok(AnalysisTicket { request })
    }

    pub fn finish_analysis(
        &mut self,
        _ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) {
        match outcome {
            Ok(result) => self.transition(FormState::ShowingResult(result)),
            Err(e) => {
                warn!("Analysis failed: {e}");
                self.transition(FormState::ShowingError(ANALYSIS_FAILED_MESSAGE.to_string()));
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        match self.state {
            FormState::ParsingFile => Err(SessionError::ParsingInProgress),
            FormState::Analyzing => Err(SessionError::AnalysisInProgress),
            _ => Ok(()),
        }
    }

    fn input_state(&self) -> FormState {
        if self.resume_text.trim().is_empty() || self.job_description.trim().is_empty() {
            FormState::Idle
        } else {
            FormState::ReadyToAnalyze
        }
    }

    fn transition(&mut self, next: FormState) {
        debug!("Session state: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}
