//! Result Renderer plus the status and error banners, as one askama page.

use askama::Template;

use crate::export::{ExportError, EXPORT_FILE_NAME};
use crate::models::analysis::AnalysisResult;
use crate::session::{FormState, SessionView};

/// Colour band for the match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Favorable,
    Neutral,
    Unfavorable,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreBand::Favorable
        } else if score >= 60 {
            ScoreBand::Neutral
        } else {
            ScoreBand::Unfavorable
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::Favorable => "favorable",
            ScoreBand::Neutral => "neutral",
            ScoreBand::Unfavorable => "unfavorable",
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub file_name: String,
    pub resume_chars: usize,
    pub job_description: String,
    pub busy: bool,
    pub parsing: bool,
    pub analyzing: bool,
    pub button_label: &'static str,
    pub error: Option<String>,
    pub result: Option<AnalysisResult>,
    pub band_class: &'static str,
    pub export_file_name: &'static str,
    /// Set when no exporter is installed; replaces the download link.
    pub export_unavailable: Option<String>,
}

impl IndexTemplate {
    pub fn new(view: SessionView, export_available: bool) -> Self {
        let busy = view.state.is_busy();
        let parsing = view.state == FormState::ParsingFile;
        let analyzing = view.state == FormState::Analyzing;
        let button_label = if analyzing {
            "Analyzing..."
        } else if parsing {
            "Processing File..."
        } else {
            "Analyze My Resume"
        };
        let (error, result) = match view.state {
            FormState::ShowingError(message) => (Some(message), None),
            FormState::ShowingResult(result) => (None, Some(result)),
            _ => (None, None),
        };
        let band_class = result
            .as_ref()
            .map(|r| ScoreBand::from_score(r.match_score).css_class())
            .unwrap_or("");

        IndexTemplate {
            file_name: view.file_name,
            resume_chars: view.resume_chars,
            job_description: view.job_description,
            busy,
            parsing,
            analyzing,
            button_label,
            error,
            result,
            band_class,
            export_file_name: EXPORT_FILE_NAME,
            export_unavailable: (!export_available).then(|| ExportError::Unavailable.to_string()),
        }
    }
}

/// Renders the whole page from a session snapshot.
pub fn render_page(view: SessionView, export_available: bool) -> Result<String, askama::Error> {
    IndexTemplate::new(view, export_available).render()
}
