use axum::extract::State;
use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/auth/whoami - current user's fresh profile row
pub async fn whoami(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .store
        .find_user_by_auth(&auth_user.auth)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", auth_user.auth)))?;

    Ok(Json(json!({ "success": true, "data": user })))
}
