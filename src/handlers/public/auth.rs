use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// External identity provider reference for the caller
    pub auth: String,
}

/// POST /auth/login - exchange a known external identity for a session token.
///
/// Credential verification belongs to the upstream identity provider; this
/// endpoint only checks that the identity maps to a user record here.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::invalid_json(e.to_string()))?;

    let user = state
        .store
        .find_user_by_auth(&req.auth)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unknown identity"))?;

    let claims = Claims::new(
        user.id,
        user.auth.clone(),
        user.name.clone(),
        user.role.clone(),
    );
    let token = generate_jwt(claims).map_err(|e| {
        tracing::error!("JWT generation failed: {}", e);
        ApiError::internal_server_error("Failed to issue session token")
    })?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": {
                "id": user.id,
                "name": user.name,
                "email": user.email,
                "role": user.role,
            }
        }
    })))
}
