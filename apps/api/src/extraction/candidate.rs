//! Candidate profile extraction — resume text → validated `CandidateProfile`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::extraction::prompts::{RESUME_EXTRACT_PROMPT_TEMPLATE, RESUME_EXTRACT_SYSTEM};
use crate::extraction::schema::{
    candidate_profile_tool, MAX_CANDIDATE_TAGS, MAX_CATEGORIES, MAX_TAG_LEN, MAX_YEARS_EXPERIENCE,
};
use crate::extraction::ExtractionError;
use crate::llm_client::prompts::TOOL_DISCIPLINE;
use crate::llm_client::ToolInvoker;
use crate::matching::categories::{is_known_category, normalize_category};
use crate::matching::levels::{normalize_level, DEFAULT_LEVEL};
use crate::matching::tags::normalize_tags;

/// Structured profile extracted from a resume. Construction goes through
/// `validate_candidate_payload`, so a stored profile always satisfies the
/// documented bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Business categories ordered by relevance; the first entry is primary.
    pub categories: Vec<String>,
    pub experience_level: String,
    pub years_experience: i32,
    pub tags: Vec<String>,
    /// Extraction confidence — surfaced to callers, never a matching input.
    pub confidence_score: f64,
}

/// Extracts a candidate profile from decoded resume text via a forced tool
/// call. Pure transform — persistence is the caller's responsibility.
pub async fn extract_candidate_profile(
    resume_text: &str,
    llm: &dyn ToolInvoker,
) -> Result<CandidateProfile, ExtractionError> {
    if resume_text.trim().is_empty() {
        return Err(ExtractionError::EmptyInput);
    }

    let prompt = RESUME_EXTRACT_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let system = format!("{RESUME_EXTRACT_SYSTEM} {TOOL_DISCIPLINE}");
    let tool = candidate_profile_tool();

    let payload = llm.invoke_tool(&prompt, &system, &tool).await?;
    Ok(validate_candidate_payload(&payload))
}

/// Local re-validation of the raw tool payload.
///
/// The schema nominally guarantees shape, but a non-compliant response must
/// never reach the matching engine: every enum is checked against its
/// allowed set, every numeric clamped, every string capped, every array
/// type-checked. Corrections are silent to the caller but logged at warn
/// level. This step must not be skipped.
pub fn validate_candidate_payload(payload: &Value) -> CandidateProfile {
    CandidateProfile {
        categories: read_categories(payload.get("categories")),
        experience_level: read_level(payload.get("experience_level")),
        years_experience: read_bounded_int(
            payload.get("years_experience"),
            "years_experience",
            0,
            MAX_YEARS_EXPERIENCE,
        ) as i32,
        tags: read_tags(payload.get("tags"), MAX_CANDIDATE_TAGS),
        confidence_score: read_confidence(payload.get("confidence_score")),
    }
}

fn read_categories(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        warn!("categories missing or not an array; defaulting to empty");
        return vec![];
    };

    let mut categories: Vec<String> = Vec::new();
    for item in items {
        let Some(raw) = item.as_str() else {
            warn!("non-string category entry dropped");
            continue;
        };
        let category = normalize_category(raw);
        if !is_known_category(&category) {
            warn!(%category, "unknown category dropped");
            continue;
        }
        // Relevance order is meaningful, so dedup in place instead of sorting.
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    if categories.len() > MAX_CATEGORIES {
        warn!(
            count = categories.len(),
            "categories exceed cap; keeping the {MAX_CATEGORIES} most relevant"
        );
        categories.truncate(MAX_CATEGORIES);
    }
    categories
}

pub(crate) fn read_level(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str).and_then(normalize_level) {
        Some(level) => level.to_string(),
        None => {
            warn!(raw = ?value, "invalid experience_level; defaulting to {DEFAULT_LEVEL}");
            DEFAULT_LEVEL.to_string()
        }
    }
}

pub(crate) fn read_bounded_int(value: Option<&Value>, field: &str, min: i64, max: i64) -> i64 {
    let Some(raw) = value.and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))) else {
        warn!(field, "missing or non-numeric; defaulting to {min}");
        return min;
    };

    let clamped = raw.clamp(min, max);
    if clamped != raw {
        warn!(field, raw, clamped, "value clamped to documented range");
    }
    clamped
}

pub(crate) fn read_tags(value: Option<&Value>, cap: usize) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        warn!("tags missing or not an array; defaulting to empty");
        return vec![];
    };

    let raw: Vec<String> = items
        .iter()
        .filter_map(|item| {
            let Some(tag) = item.as_str() else {
                warn!("non-string tag entry dropped");
                return None;
            };
            if tag.chars().count() > MAX_TAG_LEN {
                warn!("oversized tag truncated to {MAX_TAG_LEN} chars");
                Some(tag.chars().take(MAX_TAG_LEN).collect())
            } else {
                Some(tag.to_string())
            }
        })
        .collect();

    let mut tags = normalize_tags(&raw);
    if tags.len() > cap {
        warn!(count = tags.len(), cap, "tag list truncated");
        tags.truncate(cap);
    }
    tags
}

pub(crate) fn read_confidence(value: Option<&Value>) -> f64 {
    let Some(raw) = value.and_then(Value::as_f64) else {
        warn!("confidence_score missing or non-numeric; defaulting to 0.5");
        return 0.5;
    };

    let clamped = raw.clamp(0.0, 1.0);
    if clamped != raw {
        warn!(raw, clamped, "confidence_score clamped to [0, 1]");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::schema::ToolDefinition;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use serde_json::json;

    struct StubInvoker(Value);

    #[async_trait]
    impl ToolInvoker for StubInvoker {
        async fn invoke_tool(
            &self,
            _prompt: &str,
            _system: &str,
            _tool: &ToolDefinition,
        ) -> Result<Value, LlmError> {
            Ok(self.0.clone())
        }
    }

    struct FreeTextInvoker;

    #[async_trait]
    impl ToolInvoker for FreeTextInvoker {
        async fn invoke_tool(
            &self,
            _prompt: &str,
            _system: &str,
            tool: &ToolDefinition,
        ) -> Result<Value, LlmError> {
            Err(LlmError::NoToolUse {
                tool: tool.name.clone(),
            })
        }
    }

    #[test]
    fn test_compliant_payload_passes_through() {
        let profile = validate_candidate_payload(&json!({
            "categories": ["technology", "design"],
            "experience_level": "senior",
            "years_experience": 8,
            "tags": ["python", "aws", "terraform"],
            "confidence_score": 0.85
        }));

        assert_eq!(profile.categories, vec!["technology", "design"]);
        assert_eq!(profile.experience_level, "senior");
        assert_eq!(profile.years_experience, 8);
        assert_eq!(profile.tags, vec!["aws", "python", "terraform"]);
        assert!((profile.confidence_score - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_years_are_clamped() {
        let profile = validate_candidate_payload(&json!({
            "categories": ["technology"],
            "experience_level": "mid",
            "years_experience": 999,
            "tags": [],
            "confidence_score": 0.7
        }));
        assert_eq!(profile.years_experience, 50);

        let negative = validate_candidate_payload(&json!({ "years_experience": -3 }));
        assert_eq!(negative.years_experience, 0);
    }

    #[test]
    fn test_invalid_level_defaults_to_junior() {
        let profile = validate_candidate_payload(&json!({
            "experience_level": "galactic overlord"
        }));
        assert_eq!(profile.experience_level, DEFAULT_LEVEL);

        // Case folding happens before the enum check.
        let cased = validate_candidate_payload(&json!({ "experience_level": "Senior" }));
        assert_eq!(cased.experience_level, "senior");
    }

    #[test]
    fn test_empty_payload_gets_full_defaults() {
        let profile = validate_candidate_payload(&json!({}));

        assert!(profile.categories.is_empty());
        assert_eq!(profile.experience_level, DEFAULT_LEVEL);
        assert_eq!(profile.years_experience, 0);
        assert!(profile.tags.is_empty());
        assert!((profile.confidence_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_malicious_payload_is_fully_sanitized() {
        // Everything wrong at once: oversized arrays, unknown enums, wrong
        // types, out-of-range numerics. Nothing may pass through untouched.
        let long_tag = "x".repeat(500);
        let many_tags: Vec<Value> = (0..80).map(|i| json!(format!("skill-{i}"))).collect();

        let profile = validate_candidate_payload(&json!({
            "categories": ["TECHNOLOGY", "sales", "marketing", "finance", "astrology", 42],
            "experience_level": 7,
            "years_experience": "ten",
            "tags": many_tags.iter().cloned().chain([json!(long_tag), json!(99)]).collect::<Vec<_>>(),
            "confidence_score": 7.3
        }));

        assert_eq!(profile.categories, vec!["technology", "sales", "marketing"]);
        assert_eq!(profile.experience_level, DEFAULT_LEVEL);
        assert_eq!(profile.years_experience, 0);
        assert_eq!(profile.tags.len(), MAX_CANDIDATE_TAGS);
        assert!(profile.tags.iter().all(|t| t.chars().count() <= MAX_TAG_LEN));
        assert_eq!(profile.confidence_score, 1.0);
    }

    #[test]
    fn test_duplicate_categories_collapse_preserving_order() {
        let profile = validate_candidate_payload(&json!({
            "categories": ["sales", "Technology", "sales"]
        }));
        assert_eq!(profile.categories, vec!["sales", "technology"]);
    }

    #[test]
    fn test_tags_are_normalized_and_deduped() {
        let profile = validate_candidate_payload(&json!({
            "tags": ["  Python ", "PYTHON", "aws", ""]
        }));
        assert_eq!(profile.tags, vec!["aws", "python"]);
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_resume_text() {
        let stub = StubInvoker(json!({}));
        let result = extract_candidate_profile("   \n  ", &stub).await;
        assert!(matches!(result, Err(ExtractionError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_extract_fails_when_no_tool_call_is_returned() {
        let result = extract_candidate_profile("a resume", &FreeTextInvoker).await;
        assert!(matches!(
            result,
            Err(ExtractionError::Llm(LlmError::NoToolUse { .. }))
        ));
    }

    #[tokio::test]
    async fn test_extract_validates_the_stubbed_payload() {
        let stub = StubInvoker(json!({
            "categories": ["technology"],
            "experience_level": "lead",
            "years_experience": 70,
            "tags": ["Rust", "postgres"],
            "confidence_score": 0.9
        }));

        let profile = extract_candidate_profile("resume body", &stub).await.unwrap();
        assert_eq!(profile.experience_level, "lead");
        assert_eq!(profile.years_experience, 50);
        assert_eq!(profile.tags, vec!["postgres", "rust"]);
    }
}
