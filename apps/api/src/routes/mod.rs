pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::profiles::handlers as profiles;
use crate::roles::handlers as roles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profiles/ingest",
            post(profiles::handle_ingest_profile),
        )
        .route("/api/v1/profiles", get(profiles::handle_get_profile))
        // Role API
        .route(
            "/api/v1/roles",
            post(roles::handle_create_role).get(roles::handle_list_roles),
        )
        .route(
            "/api/v1/roles/:id",
            get(roles::handle_get_role).patch(roles::handle_update_role),
        )
        // Matching API
        .route("/api/v1/match/score", post(matching::handle_score))
        .route(
            "/api/v1/recommendations",
            get(matching::handle_recommendations),
        )
        .route(
            "/api/v1/recommendations/history",
            get(matching::handle_match_history),
        )
        .with_state(state)
}
