//! Role requirement analysis — posting title/description → validated
//! `RoleAnalysis`, with a deterministic fallback so role creation never
//! blocks on the LLM.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::extraction::candidate::{read_bounded_int, read_confidence, read_level, read_tags};
use crate::extraction::prompts::{ROLE_ANALYZE_PROMPT_TEMPLATE, ROLE_ANALYZE_SYSTEM};
use crate::extraction::schema::{
    role_requirements_tool, MAX_ROLE_TAGS, MAX_SHORT_DESCRIPTION_LEN, MAX_YEARS_MAX, MAX_YEARS_MIN,
};
use crate::extraction::ExtractionError;
use crate::llm_client::prompts::TOOL_DISCIPLINE;
use crate::llm_client::ToolInvoker;

/// Fallback experience target for roles whose posting could not be
/// analyzed. Distinct from the invalid-enum default: an unanalyzed role is
/// assumed mid-level, an invalid extracted value falls back to junior.
const FALLBACK_LEVEL: &str = "mid";
const FALLBACK_YEARS_MAX: i32 = 5;

/// LLM-derived requirement fields for a role posting. The admin-selected
/// category is merged in by the roles surface — it is never inferred here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAnalysis {
    pub experience_level: String,
    pub years_min: i32,
    pub years_max: i32,
    pub short_description: String,
    pub tags: Vec<String>,
    pub confidence_score: f64,
}

/// Analyzes a role posting via a forced tool call.
pub async fn extract_role_requirements(
    title: &str,
    description: &str,
    llm: &dyn ToolInvoker,
) -> Result<RoleAnalysis, ExtractionError> {
    if title.trim().is_empty() && description.trim().is_empty() {
        return Err(ExtractionError::EmptyInput);
    }

    let prompt = ROLE_ANALYZE_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{description}", description);
    let system = format!("{ROLE_ANALYZE_SYSTEM} {TOOL_DISCIPLINE}");
    let tool = role_requirements_tool();

    let payload = llm.invoke_tool(&prompt, &system, &tool).await?;
    Ok(validate_role_payload(&payload))
}

/// Local re-validation of the raw tool payload; same contract as the
/// candidate validator: check, clamp, default — never trust, never fail.
pub fn validate_role_payload(payload: &Value) -> RoleAnalysis {
    let years_min_raw = read_bounded_int(payload.get("years_min"), "years_min", 0, MAX_YEARS_MIN);
    let years_max_raw = payload
        .get("years_max")
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(years_min_raw);
    let (years_min, years_max) = clamp_years_bounds(years_min_raw, years_max_raw);

    RoleAnalysis {
        experience_level: read_level(payload.get("experience_level")),
        years_min,
        years_max,
        short_description: read_short_description(payload.get("short_description")),
        tags: read_tags(payload.get("tags"), MAX_ROLE_TAGS),
        confidence_score: read_confidence(payload.get("confidence_score")),
    }
}

/// Bounds guard applied wherever analysis results land on a role — initial
/// creation and re-analysis merges alike. `years_min` is clamped to
/// [0, 20]; `years_max` to [years_min, 25], so the maximum is never forced
/// below the (possibly clamped) minimum.
pub fn clamp_years_bounds(years_min: i64, years_max: i64) -> (i32, i32) {
    let min = years_min.clamp(0, MAX_YEARS_MIN);
    let max = years_max.clamp(min, MAX_YEARS_MAX);
    if min != years_min || max != years_max {
        warn!(years_min, years_max, min, max, "years bounds clamped");
    }
    (min as i32, max as i32)
}

fn read_short_description(value: Option<&Value>) -> String {
    let Some(raw) = value.and_then(Value::as_str) else {
        warn!("short_description missing or not a string; defaulting to empty");
        return String::new();
    };
    truncate_chars(raw.trim(), MAX_SHORT_DESCRIPTION_LEN)
}

/// Char-boundary-safe truncation (byte slicing would panic on multibyte
/// text).
fn truncate_chars(text: &str, cap: usize) -> String {
    if text.chars().count() > cap {
        warn!(cap, "short_description truncated");
        text.chars().take(cap).collect()
    } else {
        text.to_string()
    }
}

/// Deterministic substitute when the LLM call fails outright: empty tags,
/// description truncated to the short-description cap, conservative
/// mid-level bounds, zero confidence.
pub fn fallback_role_analysis(_title: &str, description: &str) -> RoleAnalysis {
    RoleAnalysis {
        experience_level: FALLBACK_LEVEL.to_string(),
        years_min: 0,
        years_max: FALLBACK_YEARS_MAX,
        short_description: truncate_chars(description.trim(), MAX_SHORT_DESCRIPTION_LEN),
        tags: vec![],
        confidence_score: 0.0,
    }
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

    #[test]
    fn test_compliant_payload_passes_through() {
        let analysis = validate_role_payload(&json!({
            "experience_level": "senior",
            "years_min": 5,
            "years_max": 10,
            "short_description": "Own the payments platform.",
            "tags": ["rust", "postgres"],
            "confidence_score": 0.8
        }));

        assert_eq!(analysis.experience_level, "senior");
        assert_eq!((analysis.years_min, analysis.years_max), (5, 10));
        assert_eq!(analysis.short_description, "Own the payments platform.");
        assert_eq!(analysis.tags, vec!["postgres", "rust"]);
    }

    #[test]
    fn test_years_bounds_clamping() {
        // min beyond its cap
        assert_eq!(clamp_years_bounds(30, 35), (20, 25));
        // max below min is pulled up, never the min pushed down
        assert_eq!(clamp_years_bounds(8, 3), (8, 8));
        // negative min
        assert_eq!(clamp_years_bounds(-2, 4), (0, 4));
        // ordinary range untouched
        assert_eq!(clamp_years_bounds(2, 6), (2, 6));
    }

    #[test]
    fn test_missing_years_max_follows_min() {
        let analysis = validate_role_payload(&json!({
            "experience_level": "mid",
            "years_min": 3
        }));
        assert_eq!((analysis.years_min, analysis.years_max), (3, 3));
    }

    #[test]
    fn test_short_description_is_char_capped() {
        let long = "é".repeat(300);
        let analysis = validate_role_payload(&json!({ "short_description": long }));
        assert_eq!(
            analysis.short_description.chars().count(),
            MAX_SHORT_DESCRIPTION_LEN
        );
    }

    #[test]
    fn test_role_tags_capped_at_fifteen() {
        let many: Vec<String> = (0..40).map(|i| format!("skill-{i}")).collect();
        let analysis = validate_role_payload(&json!({ "tags": many }));
        assert_eq!(analysis.tags.len(), MAX_ROLE_TAGS);
    }

    #[test]
    fn test_fallback_is_deterministic_and_conservative() {
        let description = "We need somebody who can do everything. ".repeat(20);
        let fallback = fallback_role_analysis("Platform Engineer", &description);

        assert_eq!(fallback.experience_level, FALLBACK_LEVEL);
        assert!(fallback.tags.is_empty());
        assert_eq!(fallback.confidence_score, 0.0);
        assert_eq!(
            fallback.short_description.chars().count(),
            MAX_SHORT_DESCRIPTION_LEN
        );
        assert_eq!(fallback, fallback_role_analysis("Platform Engineer", &description));
    }

    #[tokio::test]
    async fn test_extract_rejects_fully_empty_posting() {
        let stub = StubInvoker(json!({}));
        let result = extract_role_requirements("", "  ", &stub).await;
        assert!(matches!(result, Err(ExtractionError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_extract_validates_the_stubbed_payload() {
        let stub = StubInvoker(json!({
            "experience_level": "rockstar",
            "years_min": 25,
            "years_max": 2,
            "short_description": "Short role.",
            "tags": ["GO", "go", " kubernetes "],
            "confidence_score": -0.4
        }));

        let analysis = extract_role_requirements("Engineer", "desc", &stub)
            .await
            .unwrap();

        assert_eq!(analysis.experience_level, "junior");
        assert_eq!((analysis.years_min, analysis.years_max), (20, 20));
        assert_eq!(analysis.tags, vec!["go", "kubernetes"]);
        assert_eq!(analysis.confidence_score, 0.0);
    }
}
