//! Axum route handlers for the matching API.

use axum::{
    extract::{Query, State},
    Json,
};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::{score, MatchResult};
use crate::matching::recommend::{get_match_history, recommend_for_candidate, RankedRole};
use crate::models::match_history::MatchHistoryRow;
use crate::profiles::repo::get_latest_profile;
use crate::roles::repo::get_role;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Single-pair scoring
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub email: String,
    pub role_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub role_id: Uuid,
    pub result: MatchResult,
}

/// POST /api/v1/match/score — ad-hoc scoring of one (candidate, role)
/// pair. No history row is written.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let profile_row = get_latest_profile(&state.db, &req.email)
        .await?
        .ok_or_else(|| {
            AppError::UnprocessableEntity(
                "profile_incomplete: no resume has been ingested for this candidate".to_string(),
            )
        })?;

    let role = get_role(&state.db, req.role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {} not found", req.role_id)))?;

    let result = score(&profile_row.profile(), &role.requirement());
    Ok(Json(ScoreResponse {
        role_id: role.id,
        result,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Ranked recommendations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub email: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
}

const fn default_limit() -> usize {
    10
}

fn default_min_score() -> f64 {
    0.5
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub email: String,
    pub min_score: f64,
    pub recommendations: Vec<RankedRole>,
}

/// GET /api/v1/recommendations?email=&limit=&min_score=
///
/// Responses are cached briefly in Redis; any cache failure degrades to
/// recomputation.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Value>, AppError> {
    let limit = query.limit.clamp(1, 50);
    let min_score = query.min_score.clamp(0.0, 1.0);
    let cache_key = format!("caliper:recs:{}:{}:{:.2}", query.email, limit, min_score);

    if let Some(cached) = cache_get(&state.redis, &cache_key).await {
        if let Ok(value) = serde_json::from_str::<Value>(&cached) {
            return Ok(Json(value));
        }
    }

    let recommendations = recommend_for_candidate(&state.db, &query.email, min_score, limit).await?;

    let response = serde_json::to_value(RecommendationResponse {
        email: query.email,
        min_score,
        recommendations,
    })
    .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to serialize response: {e}")))?;

    // Stale-by-a-TTL is fine for a ranking feed; history rows are written
    // before the cache is, so persistence never depends on it.
    cache_put(
        &state.redis,
        &cache_key,
        &response.to_string(),
        state.config.recommendation_cache_ttl_secs,
    )
    .await;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub email: String,
}

/// GET /api/v1/recommendations/history?email= — persisted score snapshots.
pub async fn handle_match_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MatchHistoryRow>>, AppError> {
    Ok(Json(get_match_history(&state.db, &query.email).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Best-effort cache plumbing
// ────────────────────────────────────────────────────────────────────────────

async fn cache_get(client: &redis::Client, key: &str) -> Option<String> {
    let mut conn = client.get_multiplexed_async_connection().await.ok()?;
    conn.get::<_, Option<String>>(key).await.ok().flatten()
}

async fn cache_put(client: &redis::Client, key: &str, payload: &str, ttl_secs: u64) {
    let Ok(mut conn) = client.get_multiplexed_async_connection().await else {
        warn!("Recommendation cache unavailable; skipping write");
        return;
    };

    if let Err(e) = conn.set_ex::<_, _, ()>(key, payload, ttl_secs).await {
        warn!("Recommendation cache write failed: {e}");
    }
}
