//! Auth handlers: login, refresh, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use tempus_auth::session::LoginInput;
use tempus_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{LoginResponse, RefreshResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ClientInfo};
use crate::state::AppState;

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let result = state
        .session_manager
        .login(LoginInput {
            username: req.username,
            password: req.password,
            user_agent: client.user_agent,
            client_ip: client.client_ip,
        })
        .await
        .map_err(ApiError::authentication)?;

    Ok(Json(result.into()))
}

/// POST /api/tokens/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let result = state
        .session_manager
        .refresh(&req.refresh_token)
        .await
        .map_err(ApiError::authentication)?;

    Ok(Json(result.into()))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.rbac.resolve_actor(auth.context()).await?;
    Ok(Json(user.into()))
}
