//! Decoded token claims.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TokenError;

/// Claims carried inside every token. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Unique token id. Refresh payload ids double as session ids.
    pub id: Uuid,
    /// Username the token was issued to.
    pub subject: String,
    /// Issue time.
    pub issued_at: DateTime<Utc>,
    /// Expiry time; the token is valid only while `now < expires_at`.
    pub expires_at: DateTime<Utc>,
}

impl Payload {
    /// Creates a payload with a fresh id, issued at `now`.
    ///
    /// Fails when `now + duration` is not a representable instant.
    pub fn new(subject: &str, duration: Duration, now: DateTime<Utc>) -> Result<Self, TokenError> {
        let expires_at = now
            .checked_add_signed(duration)
            .ok_or(TokenError::DurationOutOfRange)?;

        Ok(Self {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            issued_at: now,
            expires_at,
        })
    }

    /// Checks the validity window against `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if now >= self.expires_at {
            return Err(TokenError::ExpiredToken);
        }
        Ok(())
    }
}
