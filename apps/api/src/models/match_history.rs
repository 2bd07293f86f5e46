use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted copy of one scored (candidate, role) pair. The snapshot embeds
/// the full scoring-time MatchResult, so a history row stays meaningful
/// after the profile or role changes underneath it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchHistoryRow {
    pub id: Uuid,
    pub email: String,
    pub role_id: Uuid,
    pub overall_score: f64,
    pub recommendation: String,
    pub snapshot: Value,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
}
