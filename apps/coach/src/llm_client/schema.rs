//! Declared output shape sent alongside the analysis prompt.
//!
//! Uses the completion service's OpenAPI-subset schema dialect (upper-case type names).

use serde_json::{json, Value};

/// Schema for `AnalysisResult`. Every field is required.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "matchScore": {
                "type": "NUMBER",
                "description": "A score from 0 to 100 indicating how well the resume matches the job description."
            },
            "summary": {
                "type": "STRING",
                "description": "A concise summary of the resume's strengths and weaknesses against the job description."
            },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of strings listing specific strengths of the resume."
            },
            "areasForImprovement": {
                "type": "ARRAY",
                "description": "An array of objects detailing specific suggestions for improvement.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "section": {
                            "type": "STRING",
                            "description": "The resume section to improve (e.g., 'Summary', 'Experience')."
                        },
                        "suggestion": {
                            "type": "STRING",
                            "description": "A concrete suggestion for improvement."
                        },
                        "originalText": {
                            "type": "STRING",
                            "description": "The original text snippet from the resume."
                        },
                        "suggestedText": {
                            "type": "STRING",
                            "description": "The suggested improved text snippet."
                        }
                    },
                    "required": ["section", "suggestion", "originalText", "suggestedText"]
                }
            },
            "improvedResume": {
                "type": "STRING",
                "description": "The full text of the resume with all suggestions incorporated."
            }
        },
        "required": ["matchScore", "summary", "strengths", "areasForImprovement", "improvedResume"]
    })
}
