use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A role posting with its current requirement snapshot inlined.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Admin-selected business category — never LLM-inferred.
    pub category: String,
    pub experience_level: String,
    pub years_min: i32,
    pub years_max: i32,
    pub short_description: String,
    pub tags: Vec<String>,
    pub confidence_score: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The requirement fields the matching engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub category: String,
    pub experience_level: String,
    pub years_min: i32,
    pub years_max: i32,
    pub tags: Vec<String>,
    pub confidence_score: f64,
}

impl RoleRow {
    pub fn requirement(&self) -> RoleRequirement {
        RoleRequirement {
            category: self.category.clone(),
            experience_level: self.experience_level.clone(),
            years_min: self.years_min,
            years_max: self.years_max,
            tags: self.tags.clone(),
            confidence_score: self.confidence_score,
        }
    }
}
