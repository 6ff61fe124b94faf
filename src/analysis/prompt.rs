// src/analysis/prompt.rs
//! Builds the single instruction payload sent to the model backend.
//!
//! The schema block is generated from the slot catalog, so the set of keys
//! the model is asked for and the set of slots the report can show are always
//! the same list.

use crate::report::catalog::SlotCatalog;

/// System instruction pinned alongside every analysis prompt.
pub const SYSTEM_PROMPT: &str = "You are an expert HR analyst and executive recruiter. \
Always respond with valid JSON only, no markdown formatting or extra text.";

/// Deterministic prompt for one analysis: both inputs embedded verbatim plus
/// the full output schema. The closing instruction matters - the response
/// parser only defends against fence wrapping, not free prose.
pub fn build_analysis_prompt(cv_text: &str, job_description: &str) -> String {
    let catalog = SlotCatalog::standard();
    format!(
        r#"You are an expert HR analyst and executive recruiter. Analyze the following CV/resume against the job description and provide a comprehensive candidate profile.

## CV/RESUME:
{cv_text}

## JOB DESCRIPTION:
{job_description}

## TASK:
Based on the CV and job description, fill out ALL the following fields for a Kinspire CoreHire(TM) Candidate Profile. Be specific, insightful, and professional. Extract real information from the CV where possible, and make educated assessments based on the candidate's background.

Respond ONLY with a valid JSON object with these exact keys (use empty string if information is not available):

{schema}

Important: Return ONLY the JSON object, no other text or markdown formatting."#,
        cv_text = cv_text,
        job_description = job_description,
        schema = schema_block(&catalog),
    )
}

/// The schema block: one `"key": "description"` line per catalog slot, with a
/// blank line between report sections to keep the prompt readable.
fn schema_block(catalog: &SlotCatalog) -> String {
    let mut lines = Vec::new();
    let mut current_section = "";
    for slot in catalog.slots() {
        if !current_section.is_empty() && slot.section != current_section {
            lines.push(String::new());
        }
        current_section = slot.section;
        lines.push(format!(
            "    \"{}\": \"{}\",",
            slot.key,
            slot.schema_hint.replace('"', "'")
        ));
    }
    // JSON example blocks conventionally drop the trailing comma.
    if let Some(last) = lines.last_mut() {
        *last = last.trim_end_matches(',').to_string();
    }
    format!("{{\n{}\n}}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let prompt = build_analysis_prompt("CV BODY HERE", "JOB BODY HERE");
        assert!(prompt.contains("CV BODY HERE"));
        assert!(prompt.contains("JOB BODY HERE"));
        assert!(prompt.contains("Return ONLY the JSON object"));
    }

    #[test]
    fn test_schema_covers_every_catalog_key() {
        let prompt = build_analysis_prompt("cv", "job");
        for key in SlotCatalog::standard().keys() {
            assert!(
                prompt.contains(&format!("\"{}\":", key)),
                "schema block is missing key {}",
                key
            );
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            build_analysis_prompt("a", "b"),
            build_analysis_prompt("a", "b")
        );
    }
}
