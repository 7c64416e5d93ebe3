use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::AppState;
use crate::error::{ApiError, AppError};
use crate::models::session::{MatchSummary, OpenSession};
use crate::services::lobby;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_matches))
        .route("/matches/{match_id}", get(get_match))
}

/// GET /api/matches: sessions waiting for a second player.
async fn list_matches(State(state): State<AppState>) -> Json<Vec<OpenSession>> {
    Json(lobby::open_sessions(&state.registry).await)
}

/// GET /api/matches/{match_id}
async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchSummary>, ApiError> {
    lobby::summary(&state.registry, &match_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no match {match_id}")).into())
}
