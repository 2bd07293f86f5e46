//! Recommendation ranking — scores a candidate against all open roles and
//! persists the results. This is the only module where scoring meets
//! persistence; `rank` itself stays pure so the engine remains testable
//! without a database.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::candidate::CandidateProfile;
use crate::matching::engine::{score, MatchResult};
use crate::models::match_history::MatchHistoryRow;
use crate::models::role::RoleRow;
use crate::profiles::health::profile_health;
use crate::profiles::repo::get_latest_profile;
use crate::roles::repo::get_open_roles;

/// Version stamp stored with every history row, so score snapshots can be
/// attributed to the engine revision that produced them.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One role with its scoring-time result.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRole {
    pub role: RoleRow,
    pub result: MatchResult,
}

/// Pure ranking: score every role, keep those at or above `min_score`,
/// sort by descending score — ties broken by role id so identical inputs
/// always produce identical output — and truncate to `limit`.
pub fn rank(
    profile: &CandidateProfile,
    roles: &[RoleRow],
    min_score: f64,
    limit: usize,
) -> Vec<RankedRole> {
    let mut ranked: Vec<RankedRole> = roles
        .iter()
        .map(|role| RankedRole {
            result: score(profile, &role.requirement()),
            role: role.clone(),
        })
        .filter(|entry| entry.result.overall_score >= min_score)
        .collect();

    ranked.sort_by(|a, b| {
        match b
            .result
            .overall_score
            .partial_cmp(&a.result.overall_score)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => a.role.id.cmp(&b.role.id),
            other => other,
        }
    });

    ranked.truncate(limit);
    ranked
}

/// Scores the candidate's latest profile against all open roles, then logs
/// the returned set to `match_history`.
///
/// A candidate without a usable profile gets an explicit
/// profile-incomplete error, never a scored-empty result.
pub async fn recommend_for_candidate(
    pool: &PgPool,
    email: &str,
    min_score: f64,
    limit: usize,
) -> Result<Vec<RankedRole>, AppError> {
    let row = get_latest_profile(pool, email).await?.ok_or_else(|| {
        AppError::UnprocessableEntity(
            "profile_incomplete: no resume has been ingested for this candidate".to_string(),
        )
    })?;

    let profile = row.profile();
    let health = profile_health(&profile);
    if !health.complete {
        return Err(AppError::UnprocessableEntity(format!(
            "profile_incomplete: missing {}",
            health.missing.join(", ")
        )));
    }

    let roles = get_open_roles(pool).await?;
    let ranked = rank(&profile, &roles, min_score, limit);

    let appended = log_match_history(pool, email, &ranked).await?;
    info!(
        email,
        scored = roles.len(),
        returned = ranked.len(),
        appended,
        "recommendation run complete"
    );

    Ok(ranked)
}

/// Appends history rows for (email, role) pairs that have none yet.
/// Already-recommended pairs are skipped, not re-logged. The existence
/// check is plain check-then-insert; the UNIQUE pair constraint with
/// ON CONFLICT DO NOTHING backstops concurrent writers.
pub async fn log_match_history(
    pool: &PgPool,
    email: &str,
    ranked: &[RankedRole],
) -> Result<u64, sqlx::Error> {
    let mut appended = 0u64;

    for entry in ranked {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM match_history WHERE email = $1 AND role_id = $2)",
        )
        .bind(email)
        .bind(entry.role.id)
        .fetch_one(pool)
        .await?;

        if exists {
            continue;
        }

        let snapshot = serde_json::to_value(&entry.result).unwrap_or(Value::Null);
        let result = sqlx::query(
            r#"
            INSERT INTO match_history
                (id, email, role_id, overall_score, recommendation, snapshot, engine_version)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (email, role_id) DO NOTHING
            "#,
        )
        .bind(uuid::Uuid::new_v4())
        .bind(email)
        .bind(entry.role.id)
        .bind(entry.result.overall_score)
        .bind(entry.result.recommendation.as_str())
        .bind(&snapshot)
        .bind(ENGINE_VERSION)
        .execute(pool)
        .await?;

        appended += result.rows_affected();
    }

    Ok(appended)
}

/// History rows for a candidate, newest first.
pub async fn get_match_history(
    pool: &PgPool,
    email: &str,
) -> Result<Vec<MatchHistoryRow>, sqlx::Error> {
    sqlx::query_as::<_, MatchHistoryRow>(
        "SELECT * FROM match_history WHERE email = $1 ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await
}
