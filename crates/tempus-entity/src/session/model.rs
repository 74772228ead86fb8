//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted login session anchoring one refresh token.
///
/// The id is the unique id of the refresh token payload, so a verified
/// refresh token leads directly to its session row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Refresh payload id.
    pub id: Uuid,
    /// Username the session was issued to.
    pub username: String,
    /// The exact refresh token string handed to the client.
    #[serde(skip_serializing)]
    pub refresh_token: String,
    /// User-Agent header captured at login.
    pub user_agent: String,
    /// Client IP captured at login.
    pub client_ip: String,
    /// Whether the session has been revoked.
    pub is_blocked: bool,
    /// Equal to the refresh payload's expiry.
    pub expires_at: DateTime<Utc>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Returns `true` while `now` is before the session expiry.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    pub id: Uuid,
    pub username: String,
    pub refresh_token: String,
    pub user_agent: String,
    pub client_ip: String,
    pub is_blocked: bool,
    pub expires_at: DateTime<Utc>,
}

impl CreateSession {
    /// Materialises the session row as it will be stored at `now`.
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        Session {
            id: self.id,
            username: self.username,
            refresh_token: self.refresh_token,
            user_agent: self.user_agent,
            client_ip: self.client_ip,
            is_blocked: self.is_blocked,
            expires_at: self.expires_at,
            created_at: now,
        }
    }
}
