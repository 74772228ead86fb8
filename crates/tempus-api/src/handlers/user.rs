//! User handlers.

use axum::Json;
use axum::extract::{Path, State};

use tempus_auth::rbac::require;
use tempus_core::error::AppError;
use tempus_entity::AccessRole;

use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/{id}
///
/// Self-access, or an admin of the target's company.
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    require(
        state.rbac.enforce_user(auth.context(), id).await,
        "user profile",
    )?;

    let user = state.users.get_user(id).await?;
    Ok(Json(user.into()))
}

/// GET /api/users/by-username/{username}
///
/// Admins only.
pub async fn get_user_by_username(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    require(
        state.rbac.enforce_role(auth.context(), AccessRole::Admin).await,
        "user directory",
    )?;

    let user = state.users.get_user_by_username(&username).await?;
    Ok(Json(user.into()))
}

/// GET /api/companies/{company_id}/users/{id}
///
/// Admins of the company. A user outside the company is reported as absent.
pub async fn get_company_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, id)): Path<(i64, i64)>,
) -> Result<Json<UserResponse>, ApiError> {
    require(
        state.rbac.enforce_company(auth.context(), company_id).await,
        "company members",
    )?;

    let user = state.users.get_user(id).await?;
    if user.company_id != Some(company_id) {
        return Err(AppError::not_found(format!(
            "User {id} not found in company {company_id}"
        ))
        .into());
    }
    Ok(Json(user.into()))
}
