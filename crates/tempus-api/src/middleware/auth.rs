//! Bearer authentication middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use tempus_auth::bearer::authenticate;
use tempus_auth::context::RequestContext;

use crate::error::ApiError;
use crate::extractors::ClientInfo;
use crate::state::AppState;

/// Verifies the bearer credential and binds a [`RequestContext`] to the request.
///
/// Rejects with 401 before the handler runs. The error code tells a
/// malformed header, a bad token and an expired token apart.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let payload = authenticate(header, state.token_maker.as_ref())?;

    let client = ClientInfo::from_headers(request.headers());
    let ctx = RequestContext::anonymous(client.client_ip, client.user_agent).with_identity(payload);
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}
