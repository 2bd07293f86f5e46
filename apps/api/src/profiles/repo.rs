//! Candidate profile persistence — append-only versioned rows.
//! CRITICAL: never UPDATE; a new resume upload inserts version = max + 1.

use aws_sdk_s3::primitives::ByteStream;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::candidate::CandidateProfile;
use crate::models::profile::CandidateProfileRow;

/// Latest profile version for a candidate, if any resume has been ingested.
pub async fn get_latest_profile(
    pool: &PgPool,
    email: &str,
) -> Result<Option<CandidateProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateProfileRow>(
        "SELECT * FROM candidate_profiles WHERE email = $1 ORDER BY version DESC LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Persists a freshly extracted profile as the next version and archives
/// the raw resume text to S3.
///
/// The archive is best-effort: a storage hiccup must not discard a
/// successful extraction, so upload failure only clears `resume_s3_key`.
pub async fn save_profile(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    email: &str,
    profile: &CandidateProfile,
    resume_text: &str,
) -> Result<CandidateProfileRow, sqlx::Error> {
    let current_max: Option<i32> =
        sqlx::query_scalar("SELECT MAX(version) FROM candidate_profiles WHERE email = $1")
            .bind(email)
            .fetch_one(pool)
            .await?;
    let version = current_max.unwrap_or(0) + 1;

    let s3_key = format!("resumes/{email}/v{version}.txt");
    let resume_s3_key = match s3
        .put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(resume_text.as_bytes().to_vec()))
        .content_type("text/plain")
        .send()
        .await
    {
        Ok(_) => {
            info!("Archived resume snapshot to s3://{s3_bucket}/{s3_key}");
            Some(s3_key)
        }
        Err(e) => {
            warn!("Resume snapshot upload failed; storing profile without archive key: {e}");
            None
        }
    };

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO candidate_profiles
            (id, email, version, categories, experience_level, years_experience,
             tags, confidence_score, resume_s3_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(version)
    .bind(&profile.categories)
    .bind(&profile.experience_level)
    .bind(profile.years_experience)
    .bind(&profile.tags)
    .bind(profile.confidence_score)
    .bind(&resume_s3_key)
    .execute(pool)
    .await?;

    info!("Inserted profile version {version} for {email}");

    get_latest_profile(pool, email)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}
