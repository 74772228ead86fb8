//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::AccessRole;

/// An employee account. Read-only to the authentication core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Company the user belongs to, if any.
    pub company_id: Option<i64>,
    /// Team the user belongs to, if any.
    pub team_id: Option<i64>,
    /// Access role rank.
    pub role: AccessRole,
    /// One-way password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
