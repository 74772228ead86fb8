//! `AuthUser` extractor: reads the context bound by [`require_auth`](crate::middleware::auth::require_auth).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tempus_auth::context::RequestContext;
use tempus_core::error::AppError;

use crate::error::ApiError;

/// Authenticated request context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .filter(|ctx| ctx.identity.is_some())
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::unauthorized("request is not authenticated")))
    }
}
