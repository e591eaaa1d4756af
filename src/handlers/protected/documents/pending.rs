use axum::extract::State;
use axum::Json;

use crate::database::models::PendingDocument;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/documents/pending - documents whose approval status is PENDING
/// or unset, newest first. An explicit APPROVED/REJECTED status excludes
/// the document.
pub async fn documents_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingDocument>>, ApiError> {
    let rows = state.store.pending_documents().await?;
    Ok(Json(rows))
}
