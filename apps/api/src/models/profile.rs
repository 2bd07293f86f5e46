use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::extraction::candidate::CandidateProfile;

/// One stored version of a candidate's extracted profile. Rows are
/// append-only: a new resume upload inserts the next version, and reads
/// take the highest version per email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfileRow {
    pub id: Uuid,
    pub email: String,
    pub version: i32,
    pub categories: Vec<String>,
    pub experience_level: String,
    pub years_experience: i32,
    pub tags: Vec<String>,
    pub confidence_score: f64,
    /// Object key of the archived raw resume text, when the upload succeeded.
    pub resume_s3_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CandidateProfileRow {
    /// The matching-engine view of this row.
    pub fn profile(&self) -> CandidateProfile {
        CandidateProfile {
            categories: self.categories.clone(),
            experience_level: self.experience_level.clone(),
            years_experience: self.years_experience,
            tags: self.tags.clone(),
            confidence_score: self.confidence_score,
        }
    }
}
