//! Tool definitions for forced structured extraction.
//!
//! Each extraction call offers the model exactly one tool whose
//! `input_schema` enumerates the allowed enums and bounds every numeric
//! range and array length. The schema is the first line of defense; the
//! validators in `candidate`/`role` are the second and authoritative one.

use serde::Serialize;
use serde_json::{json, Value};

use crate::matching::categories::CATEGORIES;
use crate::matching::levels::EXPERIENCE_LEVELS;

pub const CANDIDATE_PROFILE_TOOL: &str = "record_candidate_profile";
pub const ROLE_REQUIREMENTS_TOOL: &str = "record_role_requirements";

pub const MAX_CATEGORIES: usize = 3;
pub const MAX_CANDIDATE_TAGS: usize = 50;
pub const MAX_ROLE_TAGS: usize = 15;
pub const MAX_TAG_LEN: usize = 64;
pub const MAX_SHORT_DESCRIPTION_LEN: usize = 200;
pub const MAX_YEARS_EXPERIENCE: i64 = 50;
pub const MAX_YEARS_MIN: i64 = 20;
pub const MAX_YEARS_MAX: i64 = 25;

/// One tool offered to the model, in Messages API shape.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Tool schema for resume → candidate profile extraction.
pub fn candidate_profile_tool() -> ToolDefinition {
    ToolDefinition {
        name: CANDIDATE_PROFILE_TOOL.to_string(),
        description: "Record the structured profile extracted from a candidate's resume text."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "categories": {
                    "type": "array",
                    "items": { "type": "string", "enum": CATEGORIES },
                    "maxItems": MAX_CATEGORIES,
                    "description": "Business categories ordered by relevance; first is primary."
                },
                "experience_level": {
                    "type": "string",
                    "enum": EXPERIENCE_LEVELS
                },
                "years_experience": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": MAX_YEARS_EXPERIENCE
                },
                "tags": {
                    "type": "array",
                    "items": { "type": "string", "maxLength": MAX_TAG_LEN },
                    "maxItems": MAX_CANDIDATE_TAGS,
                    "description": "Concrete skills and technologies as lowercase keywords."
                },
                "confidence_score": {
                    "type": "number",
                    "minimum": 0.0,
                    "maximum": 1.0
                }
            },
            "required": [
                "categories",
                "experience_level",
                "years_experience",
                "tags",
                "confidence_score"
            ]
        }),
    }
}

/// Tool schema for role posting → requirement analysis.
pub fn role_requirements_tool() -> ToolDefinition {
    ToolDefinition {
        name: ROLE_REQUIREMENTS_TOOL.to_string(),
        description:
            "Record the structured hiring requirements extracted from a role title and description."
                .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "experience_level": {
                    "type": "string",
                    "enum": EXPERIENCE_LEVELS
                },
                "years_min": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": MAX_YEARS_MIN
                },
                "years_max": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": MAX_YEARS_MAX
                },
                "short_description": {
                    "type": "string",
                    "maxLength": MAX_SHORT_DESCRIPTION_LEN
                },
                "tags": {
                    "type": "array",
                    "items": { "type": "string", "maxLength": MAX_TAG_LEN },
                    "maxItems": MAX_ROLE_TAGS,
                    "description": "Required skills as lowercase keywords."
                },
                "confidence_score": {
                    "type": "number",
                    "minimum": 0.0,
                    "maximum": 1.0
                }
            },
            "required": [
                "experience_level",
                "years_min",
                "years_max",
                "short_description",
                "tags",
                "confidence_score"
            ]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_tool_enumerates_levels_and_categories() {
        let tool = candidate_profile_tool();
        assert_eq!(tool.name, CANDIDATE_PROFILE_TOOL);

        let levels = &tool.input_schema["properties"]["experience_level"]["enum"];
        assert_eq!(levels.as_array().unwrap().len(), EXPERIENCE_LEVELS.len());

        let categories = &tool.input_schema["properties"]["categories"]["items"]["enum"];
        assert_eq!(categories.as_array().unwrap().len(), CATEGORIES.len());
    }

    #[test]
    fn test_candidate_tool_bounds_numerics_and_arrays() {
        let schema = candidate_profile_tool().input_schema;
        assert_eq!(schema["properties"]["years_experience"]["maximum"], 50);
        assert_eq!(schema["properties"]["categories"]["maxItems"], 3);
        assert_eq!(schema["properties"]["tags"]["maxItems"], 50);
    }

    #[test]
    fn test_role_tool_bounds_years_and_description() {
        let schema = role_requirements_tool().input_schema;
        assert_eq!(schema["properties"]["years_min"]["maximum"], 20);
        assert_eq!(schema["properties"]["years_max"]["maximum"], 25);
        assert_eq!(schema["properties"]["short_description"]["maxLength"], 200);
        assert_eq!(schema["properties"]["tags"]["maxItems"], 15);
    }

    #[test]
    fn test_all_fields_are_required() {
        for tool in [candidate_profile_tool(), role_requirements_tool()] {
            let required = tool.input_schema["required"].as_array().unwrap();
            let properties = tool.input_schema["properties"].as_object().unwrap();
            assert_eq!(required.len(), properties.len(), "tool {}", tool.name);
        }
    }
}
