//! Role Matching Engine — deterministic three-factor scoring of one
//! candidate profile against one role requirement.
//!
//! Pure computation: no I/O, no clock, no randomness. Two identical inputs
//! always produce identical output, so batch scoring is safe to run
//! concurrently without coordination.

use serde::{Deserialize, Serialize};

use crate::extraction::candidate::CandidateProfile;
use crate::matching::categories::{normalize_category, tag_threshold};
use crate::matching::levels::level_index;
use crate::matching::tags::{normalize_tag_set, normalize_tags};
use crate::models::role::RoleRequirement;

// ────────────────────────────────────────────────────────────────────────────
// Fixed configuration
// ────────────────────────────────────────────────────────────────────────────

pub const CATEGORY_WEIGHT: f64 = 0.4;
pub const EXPERIENCE_WEIGHT: f64 = 0.3;
pub const TAG_WEIGHT: f64 = 0.3;

/// Reason lists are capped so downstream UIs stay scannable.
const MAX_REASONS: usize = 5;
/// Missing tags are named individually only up to this count.
const MAX_NAMED_MISSING_TAGS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Discrete recommendation tier. `PoorMatch` is also the forced outcome of
/// a category mismatch, regardless of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ExcellentMatch,
    GoodMatch,
    PossibleMatch,
    ExperienceMismatch,
    PoorMatch,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::ExcellentMatch => "excellent_match",
            Recommendation::GoodMatch => "good_match",
            Recommendation::PossibleMatch => "possible_match",
            Recommendation::ExperienceMismatch => "experience_mismatch",
            Recommendation::PoorMatch => "poor_match",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAssessment {
    pub score: f64,
    pub matches: bool,
    /// True when the role category is the candidate's first (primary) one.
    pub primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceAssessment {
    pub score: f64,
    /// Compatible iff the candidate is within one level of the role.
    pub compatible: bool,
    /// Named gap case: exact_match, slightly_overqualified,
    /// growth_opportunity, overqualified, underqualified, invalid_level.
    pub label: String,
    /// candidate index − role index; `None` when either level is unknown.
    pub gap: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAssessment {
    pub score: f64,
    pub threshold_met: bool,
    /// Fraction of the role's required tags the candidate exhibits.
    pub match_fraction: f64,
    /// The category's threshold that `match_fraction` was compared against.
    pub threshold: f64,
    pub matched_tags: Vec<String>,
    pub missing_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: f64,
    pub recommendation: Recommendation,
    pub category: CategoryAssessment,
    pub experience: ExperienceAssessment,
    pub tags: TagAssessment,
    /// Up to five ordered human-readable explanations.
    pub reasons: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores one candidate against one role. Never fails for well-typed input:
/// malformed values (unknown levels, empty tag lists) degrade to the
/// documented neutral/low scores instead of panicking.
pub fn score(profile: &CandidateProfile, role: &RoleRequirement) -> MatchResult {
    let category = assess_category(profile, role);
    let experience = assess_experience(&profile.experience_level, &role.experience_level);
    let tags = assess_tags(profile, role);

    let overall_score = CATEGORY_WEIGHT * category.score
        + EXPERIENCE_WEIGHT * experience.score
        + TAG_WEIGHT * tags.score;

    let recommendation = recommend(overall_score, &category, &experience, &tags);
    let reasons = build_reasons(profile, role, &category, &experience, &tags);

    MatchResult {
        overall_score,
        recommendation,
        category,
        experience,
        tags,
        reasons,
    }
}

/// Category dimension. The role carries a single category; it scores 1.0
/// when it is the candidate's primary category, 0.8 when secondary, 0.0
/// when absent. Absence is a hard gate handled in `recommend`.
fn assess_category(profile: &CandidateProfile, role: &RoleRequirement) -> CategoryAssessment {
    let target = normalize_category(&role.category);
    match profile
        .categories
        .iter()
        .position(|c| normalize_category(c) == target)
    {
        Some(0) => CategoryAssessment {
            score: 1.0,
            matches: true,
            primary: true,
        },
        Some(_) => CategoryAssessment {
            score: 0.8,
            matches: true,
            primary: false,
        },
        None => CategoryAssessment {
            score: 0.0,
            matches: false,
            primary: false,
        },
    }
}

/// Experience dimension, scored by exact index gap on the ordinal scale.
/// Unknown levels score a neutral 0.5 and are never compatible.
fn assess_experience(candidate_level: &str, role_level: &str) -> ExperienceAssessment {
    let (Some(candidate), Some(role)) = (level_index(candidate_level), level_index(role_level))
    else {
        return ExperienceAssessment {
            score: 0.5,
            compatible: false,
            label: "invalid_level".to_string(),
            gap: None,
        };
    };

    let gap = candidate as i32 - role as i32;
    let (score, label) = match gap {
        0 => (1.0, "exact_match"),
        1 => (0.9, "slightly_overqualified"),
        -1 => (0.8, "growth_opportunity"),
        g if g >= 2 => (0.3, "overqualified"),
        _ => (0.2, "underqualified"),
    };

    ExperienceAssessment {
        score,
        compatible: gap.abs() <= 1,
        label: label.to_string(),
        gap: Some(gap),
    }
}

/// Tag dimension. A role with no required tags is a lenient pass (0.8), a
/// candidate with no tags against a tagged role scores zero, and otherwise
/// the overlap fraction is banded with a linear scale-down below the
/// category threshold.
fn assess_tags(profile: &CandidateProfile, role: &RoleRequirement) -> TagAssessment {
    let required = normalize_tags(&role.tags);
    let threshold = tag_threshold(&normalize_category(&role.category));

    if required.is_empty() {
        return TagAssessment {
            score: 0.8,
            threshold_met: true,
            match_fraction: 1.0,
            threshold,
            matched_tags: vec![],
            missing_tags: vec![],
        };
    }

    let owned = normalize_tag_set(&profile.tags);
    if owned.is_empty() {
        return TagAssessment {
            score: 0.0,
            threshold_met: false,
            match_fraction: 0.0,
            threshold,
            matched_tags: vec![],
            missing_tags: required,
        };
    }

    let (matched_tags, missing_tags): (Vec<String>, Vec<String>) =
        required.iter().cloned().partition(|t| owned.contains(t));

    let match_fraction = matched_tags.len() as f64 / required.len() as f64;
    let threshold_met = match_fraction >= threshold;

    let score = if match_fraction >= 0.7 {
        1.0
    } else if match_fraction >= 0.5 {
        0.8
    } else if threshold_met {
        0.6
    } else {
        // Linear scale-down: half the required threshold scores 0.25.
        (match_fraction / threshold) * 0.5
    };

    TagAssessment {
        score,
        threshold_met,
        match_fraction,
        threshold,
        matched_tags,
        missing_tags,
    }
}

/// Recommendation ladder, first match wins. The category mismatch gate
/// overrides everything else.
fn recommend(
    overall: f64,
    category: &CategoryAssessment,
    experience: &ExperienceAssessment,
    tags: &TagAssessment,
) -> Recommendation {
    if !category.matches {
        return Recommendation::PoorMatch;
    }
    if overall >= 0.85 && experience.compatible && tags.threshold_met {
        return Recommendation::ExcellentMatch;
    }
    if overall >= 0.70 && experience.compatible {
        return Recommendation::GoodMatch;
    }
    if overall >= 0.50 && experience.compatible {
        return Recommendation::PossibleMatch;
    }
    if overall >= 0.50 {
        return Recommendation::ExperienceMismatch;
    }
    Recommendation::PoorMatch
}

// ────────────────────────────────────────────────────────────────────────────
// Reason generation
// ────────────────────────────────────────────────────────────────────────────

/// Builds the ordered explanation list: category, experience, skill
/// coverage, missing skills, and an extra-breadth note. Total functions
/// only — reason generation can never fail a scoring run.
fn build_reasons(
    profile: &CandidateProfile,
    role: &RoleRequirement,
    category: &CategoryAssessment,
    experience: &ExperienceAssessment,
    tags: &TagAssessment,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if category.matches {
        if category.primary {
            reasons.push(format!("Primary category match: {}", role.category));
        } else {
            reasons.push(format!("Secondary category match: {}", role.category));
        }
    } else {
        reasons.push(format!(
            "Category mismatch: profile does not cover {}",
            role.category
        ));
    }

    reasons.push(match experience.label.as_str() {
        "exact_match" => "Experience level matches the role exactly".to_string(),
        "slightly_overqualified" => {
            format!("One level above the role's {} target", role.experience_level)
        }
        "growth_opportunity" => format!(
            "One level below the role's {} target — a growth opportunity",
            role.experience_level
        ),
        "overqualified" => "Substantially overqualified for this role".to_string(),
        "underqualified" => "Experience falls well below the role requirement".to_string(),
        _ => "Experience levels could not be compared".to_string(),
    });

    if role.tags.is_empty() {
        reasons.push("Role lists no required skills".to_string());
    } else {
        reasons.push(format!(
            "Matches {} of {} required skills",
            tags.matched_tags.len(),
            tags.matched_tags.len() + tags.missing_tags.len()
        ));
        if !tags.missing_tags.is_empty() {
            if tags.missing_tags.len() <= MAX_NAMED_MISSING_TAGS {
                reasons.push(format!("Missing skills: {}", tags.missing_tags.join(", ")));
            } else {
                reasons.push(format!(
                    "Missing {} required skills",
                    tags.missing_tags.len()
                ));
            }
        }
    }

    let extra_skills = profile.tags.len().saturating_sub(tags.matched_tags.len());
    if extra_skills > 5 {
        reasons.push(format!(
            "Brings {extra_skills} additional skills beyond the role requirements"
        ));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
