//! Client metadata captured from request headers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

const UNKNOWN: &str = "unknown";

/// Client IP and user agent of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub client_ip: String,
    pub user_agent: String,
}

impl ClientInfo {
    /// Reads `x-forwarded-for` (first entry), then `x-real-ip`, and `user-agent`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        let client_ip = header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| header("x-real-ip").map(str::trim))
            .unwrap_or(UNKNOWN)
            .to_string();

        let user_agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(UNKNOWN)
            .to_string();

        Self {
            client_ip,
            user_agent,
        }
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
