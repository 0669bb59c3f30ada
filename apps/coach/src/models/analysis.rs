use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Message shown when a submission is missing either input.
pub const VALIDATION_MESSAGE: &str =
    "Please upload your resume file and provide the job description.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", VALIDATION_MESSAGE)]
pub struct ValidationError;

/// The two inputs of one analysis. Neither field is ever blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    resume_text: String,
    job_description: String,
}

impl AnalysisRequest {
    pub fn new(
        resume_text: impl Into<String>,
        job_description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let resume_text = resume_text.into();
        let job_description = job_description.into();
        if resume_text.trim().is_empty() || job_description.trim().is_empty() {
            return Err(ValidationError);
        }
        Ok(Self {
            resume_text,
            job_description,
        })
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}

/// One localized before/after edit suggested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementArea {
    pub section: String,
    pub suggestion: String,
    pub original_text: String,
    pub suggested_text: String,
}

/// Structured analysis returned by the completion service.
///
/// Deserialization is the validation step: every field is required and typed,
/// and `matchScore` must be a number within 0..=100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "deserialize_match_score")]
    pub match_score: u8,
    pub summary: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<ImprovementArea>,
    pub improved_resume: String,
}

/// Accepts any finite JSON number in range and rounds it; the model declares the
/// field as NUMBER so `85.0` and `84.6` both occur in practice.
fn deserialize_match_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || !(0.0..=100.0).contains(&raw) {
        return Err(D::Error::custom(format!(
            "matchScore must be between 0 and 100, got {raw}"
        )));
    }
    Ok(raw.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "matchScore": 78,
        "summary": "Solid backend profile.",
        "strengths": ["Rust", "Distributed systems"],
        "areasForImprovement": [
            {
                "section": "Experience",
                "suggestion": "Quantify impact.",
                "originalText": "Improved latency.",
                "suggestedText": "Cut p99 latency by 40%."
            }
        ],
        "improvedResume": "Jane Doe\nSenior Engineer"
    }"#;

    #[test]
    fn test_request_rejects_blank_inputs() {
        assert_eq!(AnalysisRequest::new("", "jd"), Err(ValidationError));
        assert_eq!(AnalysisRequest::new("resume", " \n\t"), Err(ValidationError));
        assert!(AnalysisRequest::new("resume", "jd").is_ok());
    }

    #[test]
    fn test_request_keeps_inputs_verbatim() {
        let req = AnalysisRequest::new("  resume  ", "jd\n").unwrap();
        assert_eq!(req.resume_text(), "  resume  ");
        assert_eq!(req.job_description(), "jd\n");
    }

    #[test]
    fn test_valid_result_deserializes() {
        let result: AnalysisResult = serde_json::from_str(VALID).unwrap();
        assert_eq!(result.match_score, 78);
        assert_eq!(result.strengths, vec!["Rust", "Distributed systems"]);
        assert_eq!(result.areas_for_improvement[0].suggested_text, "Cut p99 latency by 40%.");
    }

    #[test]
    fn test_fractional_score_is_rounded() {
        let json = VALID.replace("\"matchScore\": 78", "\"matchScore\": 84.6");
        let result: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.match_score, 85);
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let json = VALID.replace("\"matchScore\": 78", "\"matchScore\": 140");
        assert!(serde_json::from_str::<AnalysisResult>(&json).is_err());
        let json = VALID.replace("\"matchScore\": 78", "\"matchScore\": -1");
        assert!(serde_json::from_str::<AnalysisResult>(&json).is_err());
    }

    #[test]
    fn test_string_score_is_rejected() {
        let json = VALID.replace("\"matchScore\": 78", "\"matchScore\": \"78\"");
        assert!(serde_json::from_str::<AnalysisResult>(&json).is_err());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = VALID.replace("\"summary\": \"Solid backend profile.\",", "");
        assert!(serde_json::from_str::<AnalysisResult>(&json).is_err());
    }

    #[test]
    fn test_incomplete_improvement_is_rejected() {
        let json = VALID.replace("\"originalText\": \"Improved latency.\",", "");
        assert!(serde_json::from_str::<AnalysisResult>(&json).is_err());
    }
}
