//! Axum route handlers for the profile API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::candidate::extract_candidate_profile;
use crate::models::profile::CandidateProfileRow;
use crate::profiles::health::{profile_health, ProfileHealth};
use crate::profiles::repo::{get_latest_profile, save_profile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestProfileRequest {
    pub email: String,
    /// Decoded resume text. File parsing happens upstream of this API.
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: CandidateProfileRow,
    pub health: ProfileHealth,
}

/// POST /api/v1/profiles/ingest
///
/// Extracts a profile from resume text and stores it as the next version.
/// Extraction failure surfaces as an error — there is no meaningful
/// fallback profile to substitute.
pub async fn handle_ingest_profile(
    State(state): State<AppState>,
    Json(req): Json<IngestProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::Validation("email must not be empty".to_string()));
    }
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text must not be empty".to_string(),
        ));
    }

    let profile = extract_candidate_profile(&req.resume_text, &state.llm).await?;
    let row = save_profile(
        &state.db,
        &state.s3,
        &state.config.s3_bucket,
        req.email.trim(),
        &profile,
        &req.resume_text,
    )
    .await?;

    let health = profile_health(&profile);
    Ok(Json(ProfileResponse { profile: row, health }))
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub email: String,
}

/// GET /api/v1/profiles?email=
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = get_latest_profile(&state.db, &params.email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for {}", params.email)))?;

    let health = profile_health(&row.profile());
    Ok(Json(ProfileResponse { profile: row, health }))
}
