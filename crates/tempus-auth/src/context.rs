//! Request-scoped identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tempus_core::error::AppError;

use crate::token::Payload;

/// Context for the current request.
///
/// Built by the authentication layer and passed explicitly to the session
/// and RBAC operations, so every decision knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Verified token payload, absent until authentication succeeds.
    pub identity: Option<Payload>,
    /// IP address of the request origin.
    pub client_ip: String,
    /// User-Agent header value.
    pub user_agent: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context without an identity.
    pub fn anonymous(client_ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            identity: None,
            client_ip: client_ip.into(),
            user_agent: user_agent.into(),
            request_time: Utc::now(),
        }
    }

    /// Binds a verified payload to this context.
    pub fn with_identity(mut self, payload: Payload) -> Self {
        self.identity = Some(payload);
        self
    }

    /// The acting username.
    ///
    /// Fails with `Unauthorized` when no identity has been bound.
    pub fn subject(&self) -> Result<&str, AppError> {
        self.identity
            .as_ref()
            .map(|p| p.subject.as_str())
            .ok_or_else(|| AppError::unauthorized("request has no authenticated identity"))
    }
}
