//! Profile completeness — the gate that turns "never extracted" or
//! "extracted but empty" into an explicit signal instead of a silently
//! low-scoring recommendation run.

use serde::{Deserialize, Serialize};

use crate::extraction::candidate::CandidateProfile;

/// Confidence under this value earns an advisory recommendation, but does
/// not block matching on its own.
const LOW_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileHealth {
    /// Complete enough to match: at least one category and one skill tag.
    pub complete: bool,
    pub missing: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn profile_health(profile: &CandidateProfile) -> ProfileHealth {
    let mut missing = Vec::new();
    let mut recommendations = Vec::new();

    if profile.categories.is_empty() {
        missing.push("categories".to_string());
        recommendations.push(
            "No business category could be derived — upload a resume that names your field."
                .to_string(),
        );
    }

    if profile.tags.is_empty() {
        missing.push("tags".to_string());
        recommendations.push(
            "No skills were extracted — list concrete technologies and competencies.".to_string(),
        );
    }

    if profile.confidence_score < LOW_CONFIDENCE {
        recommendations.push(
            "Extraction confidence is low — a cleaner or fuller resume will improve matches."
                .to_string(),
        );
    }

    ProfileHealth {
        complete: missing.is_empty(),
        missing,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_profile() -> CandidateProfile {
        CandidateProfile {
            categories: vec!["technology".to_string()],
            experience_level: "mid".to_string(),
            years_experience: 5,
            tags: vec!["rust".to_string()],
            confidence_score: 0.9,
        }
    }

    #[test]
    fn test_full_profile_is_complete() {
        let health = profile_health(&full_profile());
        assert!(health.complete);
        assert!(health.missing.is_empty());
        assert!(health.recommendations.is_empty());
    }

    #[test]
    fn test_missing_categories_block_matching() {
        let mut profile = full_profile();
        profile.categories.clear();

        let health = profile_health(&profile);
        assert!(!health.complete);
        assert_eq!(health.missing, vec!["categories"]);
    }

    #[test]
    fn test_missing_tags_block_matching() {
        let mut profile = full_profile();
        profile.tags.clear();

        let health = profile_health(&profile);
        assert!(!health.complete);
        assert_eq!(health.missing, vec!["tags"]);
    }

    #[test]
    fn test_low_confidence_is_advisory_only() {
        let mut profile = full_profile();
        profile.confidence_score = 0.1;

        let health = profile_health(&profile);
        assert!(health.complete);
        assert_eq!(health.recommendations.len(), 1);
    }
}
