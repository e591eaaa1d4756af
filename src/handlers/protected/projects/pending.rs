use axum::extract::State;
use axum::Json;

use crate::database::models::PendingProject;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/projects/pending - projects awaiting a decision, newest first
pub async fn projects_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingProject>>, ApiError> {
    let rows = state.store.pending_projects().await?;
    Ok(Json(rows))
}
