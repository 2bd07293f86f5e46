//! Axum route handlers for the role API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::role::{extract_role_requirements, fallback_role_analysis};
use crate::matching::categories::{is_known_category, normalize_category, CATEGORIES};
use crate::models::role::RoleRow;
use crate::roles::repo::{
    get_open_roles, get_role, insert_role, update_role_requirements, update_role_text,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub title: String,
    pub description: String,
    /// Admin-selected business category.
    pub category: String,
}

/// POST /api/v1/roles
///
/// Creates a role and analyzes its requirements. An LLM failure downgrades
/// to the deterministic fallback — role creation never blocks on
/// extraction.
pub async fn handle_create_role(
    State(state): State<AppState>,
    Json(req): Json<CreateRoleRequest>,
) -> Result<Json<RoleRow>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }

    let category = normalize_category(&req.category);
    if !is_known_category(&category) {
        return Err(AppError::Validation(format!(
            "unknown category '{}'; expected one of: {}",
            req.category,
            CATEGORIES.join(", ")
        )));
    }

    let analysis = match extract_role_requirements(&req.title, &req.description, &state.llm).await
    {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!("Role analysis failed, applying deterministic fallback: {err}");
            fallback_role_analysis(&req.title, &req.description)
        }
    };

    let now = Utc::now();
    let role = RoleRow {
        id: Uuid::new_v4(),
        title: req.title.trim().to_string(),
        description: req.description,
        category,
        experience_level: analysis.experience_level,
        years_min: analysis.years_min,
        years_max: analysis.years_max,
        short_description: analysis.short_description,
        tags: analysis.tags,
        confidence_score: analysis.confidence_score,
        status: "open".to_string(),
        created_at: now,
        updated_at: now,
    };

    insert_role(&state.db, &role).await?;
    info!("Created role {} ({})", role.id, role.title);

    Ok(Json(role))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// PATCH /api/v1/roles/:id
///
/// Updates the posting text and responds immediately. Requirement
/// regeneration runs as a background task; its failure is logged and never
/// affects the response already returned to the caller.
pub async fn handle_update_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<RoleRow>, AppError> {
    let existing = get_role(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {id} not found")))?;

    let title = req.title.unwrap_or_else(|| existing.title.clone());
    let description = req.description.unwrap_or_else(|| existing.description.clone());

    update_role_text(&state.db, id, &title, &description).await?;

    let updated = get_role(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {id} not found")))?;

    let pool = state.db.clone();
    let llm = state.llm.clone();
    tokio::spawn(async move {
        match extract_role_requirements(&title, &description, &llm).await {
            Ok(analysis) => match update_role_requirements(&pool, id, &analysis).await {
                Ok(_) => info!("Refreshed requirements for role {id}"),
                Err(e) => warn!("Failed to store re-analysis for role {id}: {e}"),
            },
            Err(e) => warn!("Background re-analysis failed for role {id}: {e}"),
        }
    });

    Ok(Json(updated))
}

/// GET /api/v1/roles — all open roles.
pub async fn handle_list_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleRow>>, AppError> {
    Ok(Json(get_open_roles(&state.db).await?))
}

/// GET /api/v1/roles/:id
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoleRow>, AppError> {
    let role = get_role(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {id} not found")))?;
    Ok(Json(role))
}
