//! Business categories and the per-category tag-match threshold table.
//!
//! The threshold is the minimum fraction of a role's required tags a
//! candidate must exhibit for the tag dimension to count as "met".
//! Categories absent from the table fall back to `DEFAULT_TAG_THRESHOLD`.

/// Business categories offered to admins and enumerated in the extraction
/// schema. Stored lowercase.
pub const CATEGORIES: [&str; 10] = [
    "technology",
    "sales",
    "marketing",
    "finance",
    "operations",
    "design",
    "healthcare",
    "education",
    "customer_support",
    "legal",
];

/// Tag-match threshold for categories not listed in the table below.
pub const DEFAULT_TAG_THRESHOLD: f64 = 0.25;

/// Minimum required-tag overlap fraction, per category. Skill-dense fields
/// demand more overlap before the tag dimension counts as met.
pub const CATEGORY_TAG_THRESHOLDS: &[(&str, f64)] = &[
    ("technology", 0.35),
    ("finance", 0.40),
    ("healthcare", 0.40),
    ("legal", 0.45),
    ("sales", 0.30),
    ("marketing", 0.30),
    ("design", 0.30),
    ("education", 0.25),
];

/// Canonical form of a category label.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// Tag-match threshold for a category (already normalized by the caller).
pub fn tag_threshold(category: &str) -> f64 {
    CATEGORY_TAG_THRESHOLDS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, threshold)| *threshold)
        .unwrap_or(DEFAULT_TAG_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_categories_use_table_thresholds() {
        assert_eq!(tag_threshold("technology"), 0.35);
        assert_eq!(tag_threshold("legal"), 0.45);
    }

    #[test]
    fn test_unlisted_categories_fall_back_to_default() {
        assert_eq!(tag_threshold("operations"), DEFAULT_TAG_THRESHOLD);
        assert_eq!(tag_threshold("customer_support"), DEFAULT_TAG_THRESHOLD);
        assert_eq!(tag_threshold("basket-weaving"), DEFAULT_TAG_THRESHOLD);
    }

    #[test]
    fn test_threshold_table_only_names_known_categories() {
        for (name, _) in CATEGORY_TAG_THRESHOLDS {
            assert!(is_known_category(name), "unknown category in table: {name}");
        }
    }

    #[test]
    fn test_thresholds_are_meaningful_fractions() {
        for (name, threshold) in CATEGORY_TAG_THRESHOLDS {
            assert!(
                *threshold > 0.0 && *threshold < 1.0,
                "threshold out of range for {name}"
            );
        }
        assert!(DEFAULT_TAG_THRESHOLD > 0.0 && DEFAULT_TAG_THRESHOLD < 1.0);
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("  Technology "), "technology");
        assert!(is_known_category(&normalize_category("SALES")));
        assert!(!is_known_category("astrology"));
    }
}
