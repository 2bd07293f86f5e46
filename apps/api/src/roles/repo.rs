//! Role persistence. Requirement fields live inline on the role row and
//! are overwritten whenever re-analysis completes.

use sqlx::PgPool;
use uuid::Uuid;

use crate::extraction::role::RoleAnalysis;
use crate::models::role::RoleRow;

pub async fn insert_role(pool: &PgPool, role: &RoleRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO roles
            (id, title, description, category, experience_level, years_min,
             years_max, short_description, tags, confidence_score, status,
             created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(role.id)
    .bind(&role.title)
    .bind(&role.description)
    .bind(&role.category)
    .bind(&role.experience_level)
    .bind(role.years_min)
    .bind(role.years_max)
    .bind(&role.short_description)
    .bind(&role.tags)
    .bind(role.confidence_score)
    .bind(&role.status)
    .bind(role.created_at)
    .bind(role.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_role(pool: &PgPool, id: Uuid) -> Result<Option<RoleRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleRow>("SELECT * FROM roles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All roles still accepting applications, newest first.
pub async fn get_open_roles(pool: &PgPool) -> Result<Vec<RoleRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleRow>(
        "SELECT * FROM roles WHERE status = 'open' ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// Updates the posting text only. Requirement fields are refreshed
/// separately once re-analysis finishes.
pub async fn update_role_text(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    description: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE roles SET title = $2, description = $3, updated_at = now() WHERE id = $1",
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Merges a completed re-analysis into the role row.
pub async fn update_role_requirements(
    pool: &PgPool,
    id: Uuid,
    analysis: &RoleAnalysis,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE roles
        SET experience_level = $2, years_min = $3, years_max = $4,
            short_description = $5, tags = $6, confidence_score = $7,
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&analysis.experience_level)
    .bind(analysis.years_min)
    .bind(analysis.years_max)
    .bind(&analysis.short_description)
    .bind(&analysis.tags)
    .bind(analysis.confidence_score)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
