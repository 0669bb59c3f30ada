// Prompt for the resume-vs-job-description analysis.
// The output field list mirrors `llm_client::schema::analysis_response_schema`.

/// Sampling temperature for analysis calls. Low, to keep the model literal about the schema.
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Embeds both inputs verbatim into the fixed analysis instructions.
///
/// Built with a single `format!` so text inside the inputs is never substituted again.
pub fn build_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"
You are an expert career coach and professional resume writer with years of experience helping candidates land jobs at top companies. Your task is to analyze the provided resume against the given job description.

**Resume:**
```
{resume_text}
```

**Job Description:**
```
{job_description}
```

Provide a detailed analysis in the specified JSON format. The analysis must include:
1.  **matchScore**: An integer score from 0 to 100 representing how well the resume matches the job description. Be critical and realistic.
2.  **summary**: A concise, professional summary of the analysis, highlighting key strengths and areas for improvement.
3.  **strengths**: An array of strings detailing specific strengths, such as relevant skills or experiences mentioned.
4.  **areasForImprovement**: An array of objects, where each object identifies a specific section of the resume, provides a concrete suggestion for improvement, and includes the original and suggested text snippets. Focus on tailoring the resume to the job description, quantifying achievements, and using strong action verbs.
5.  **improvedResume**: The full text of the improved resume with all your suggestions incorporated. This should be a complete, polished resume ready to be used.

Analyze thoroughly and provide high-quality, actionable feedback.
"#
    )
}
