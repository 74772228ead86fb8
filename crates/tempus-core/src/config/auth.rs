//! Authentication configuration.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which token construction the server issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// AES-256-GCM sealed tokens (payload is encrypted and authenticated).
    #[default]
    Sealed,
    /// HS256 JSON Web Tokens (payload is signed only).
    Jwt,
}

/// Token and credential configuration. Immutable after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric key for token sealing. Must be exactly 32 bytes for
    /// `sealed` tokens and at least 32 bytes for `jwt`.
    pub token_symmetric_key: String,
    /// Token construction.
    #[serde(default)]
    pub token_kind: TokenKind,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_duration")]
    pub access_token_duration_minutes: i64,
    /// Refresh token lifetime in hours.
    #[serde(default = "default_refresh_duration")]
    pub refresh_token_duration_hours: i64,
}

impl AuthConfig {
    /// Access token lifetime.
    pub fn access_token_duration(&self) -> Result<Duration, AppError> {
        lifetime(
            "access_token_duration_minutes",
            Duration::try_minutes(self.access_token_duration_minutes),
        )
    }

    /// Refresh token lifetime.
    pub fn refresh_token_duration(&self) -> Result<Duration, AppError> {
        lifetime(
            "refresh_token_duration_hours",
            Duration::try_hours(self.refresh_token_duration_hours),
        )
    }

    /// Rejects lifetimes that are not positive or that would push an expiry
    /// past the last representable instant.
    pub fn validate(&self) -> Result<(), AppError> {
        self.access_token_duration()?;
        self.refresh_token_duration()?;
        Ok(())
    }
}

fn lifetime(field: &str, duration: Option<Duration>) -> Result<Duration, AppError> {
    duration
        .filter(|d| *d > Duration::zero())
        .filter(|d| Utc::now().checked_add_signed(*d).is_some())
        .ok_or_else(|| AppError::configuration(format!("auth.{field} is out of range")))
}

fn default_access_duration() -> i64 {
    15
}

fn default_refresh_duration() -> i64 {
    24
}
