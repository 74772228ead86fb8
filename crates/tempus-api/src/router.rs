//! Route definitions for the Tempus HTTP API.
//!
//! All routes are mounted under `/api`. Protected routes sit behind
//! [`require_auth`](crate::middleware::auth::require_auth).

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(protected_auth_routes())
        .merge(user_routes())
        .merge(session_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let api_routes = Router::new()
        .merge(public_auth_routes())
        .merge(health_routes())
        .merge(protected);

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Login and refresh: no bearer credential required
fn public_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users/login", post(handlers::auth::login))
        .route("/tokens/refresh", post(handlers::auth::refresh))
}

fn protected_auth_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(handlers::auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(handlers::user::get_user))
        .route(
            "/users/by-username/{username}",
            get(handlers::user::get_user_by_username),
        )
        .route(
            "/companies/{company_id}/users/{id}",
            get(handlers::user::get_company_user),
        )
}

fn session_routes() -> Router<AppState> {
    Router::new().route("/sessions/{id}/revoke", post(handlers::session::revoke))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
