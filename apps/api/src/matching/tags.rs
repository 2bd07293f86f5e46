//! Skill-tag normalization — the single value-object constructor used by
//! both extraction output and matching input.
//!
//! A tag is a lowercase, trimmed keyword. Normalizing in exactly one place
//! keeps the set intersection in the engine case-insensitive without ad hoc
//! folding at call sites.

use std::collections::HashSet;

/// Canonical form of a single tag.
pub fn normalize_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalizes a tag list for storage: empty entries dropped, duplicates
/// collapsed, result sorted for stable persistence and display.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut result: Vec<String> = tags
        .iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .collect();
    result.sort();
    result.dedup();
    result
}

/// Normalized tag set for intersection tests.
pub fn normalize_tag_set(tags: &[String]) -> HashSet<String> {
    tags.iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .collect()
}
