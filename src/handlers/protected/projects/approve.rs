use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::ApprovalService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApproveQuery {
    /// `expand=approver` adds the actor's name/email to the project view
    pub expand: Option<String>,
}

/// POST /api/projects/:id/approve - apply an approve/reject decision.
///
/// Body: `{"approved": bool}`. `approved` is required and must be a JSON
/// boolean; anything else is a 400 before the workflow runs.
pub async fn project_approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ApproveQuery>,
    Extension(auth_user): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let project_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("Invalid project id"))?;

    let Json(body) = body.map_err(|e| ApiError::invalid_json(e.to_string()))?;
    let approved = match body.get("approved") {
        Some(Value::Bool(b)) => *b,
        _ => {
            return Err(ApiError::bad_request(
                "'approved' is required and must be a boolean",
            ))
        }
    };

    let expand = matches!(query.expand.as_deref(), Some("approver"));

    let service = ApprovalService::new(state.store.clone(), state.broadcaster.clone());
    let outcome = service
        .decide(project_id, &auth_user.auth, approved, expand)
        .await?;

    Ok(Json(json!({
        "message": outcome.message,
        "project": outcome.project,
    })))
}
