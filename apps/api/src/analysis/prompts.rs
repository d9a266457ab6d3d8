// Prompt templates for resume matching and cover letter drafting.
// Inputs are interpolated verbatim; the completion service handles truncation.

/// Stand-in for the existing letter when the user supplied neither text nor file.
pub const NO_EXISTING_LETTER: &str = "[No existing letter provided]";

/// Asks for a match analysis followed by a fenced JSON array of `{old, new}` edits.
pub fn compose_match_prompt(resume_text: &str, job_text: &str) -> String {
    format!(
        r#"Compare the resume and the job description below and reply with:

1. An estimated match percentage with 2-3 sentences of reasoning
2. The strongest matching skills, as plain bullet points
3. The most important missing or weak areas, as plain bullet points
4. 2-3 specific suggestions for improving the resume
5. Concrete edits to the resume as a JSON array of objects, each with an "old" field (exact text from the resume) and a "new" field (the replacement), inside a ```json fenced code block

Resume:
{resume_text}

Job Description:
{job_text}
"#
    )
}

/// Asks for a rewritten (or new) cover letter, plain text body only.
pub fn compose_cover_letter_prompt(
    resume_text: &str,
    job_text: &str,
    existing_letter: Option<&str>,
) -> String {
    let existing_letter = existing_letter.unwrap_or(NO_EXISTING_LETTER);
    format!(
        r#"You are a writing assistant. Improve the cover letter below so it fits the resume and job description.

Resume:
{resume_text}

Job Description:
{job_text}

Existing Cover Letter:
{existing_letter}

Instructions:
- Keep the tone professional and concise.
- Highlight the skills that match the job.
- If no existing letter is provided, write a new one.
- Use plain text only, no markdown.
- Output only the body of the cover letter, with no commentary before or after it.
"#
    )
}
