//! HS256 JSON Web Tokens.
//!
//! The payload is signed but readable by the client. Expiry is checked here
//! rather than by `jsonwebtoken` so that the zero-leeway rule and the error
//! kinds match [`SealedTokenMaker`](super::SealedTokenMaker).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TokenMaker;
use super::error::TokenError;
use super::payload::Payload;

/// Minimum secret length in bytes.
pub const MIN_SECRET_SIZE: usize = 32;

/// Registered claims as they appear on the wire.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    jti: Uuid,
    sub: String,
    iat: i64,
    exp: i64,
}

impl Claims {
    fn into_payload(self) -> Result<Payload, TokenError> {
        Ok(Payload {
            id: self.jti,
            subject: self.sub,
            issued_at: from_timestamp(self.iat)?,
            expires_at: from_timestamp(self.exp)?,
        })
    }
}

fn from_timestamp(secs: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(secs, 0).ok_or(TokenError::InvalidToken)
}

/// Creates and validates HS256 tokens.
#[derive(Clone)]
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtMaker")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtMaker {
    /// Creates a maker from a secret of at least [`MIN_SECRET_SIZE`] bytes.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_SIZE {
            return Err(TokenError::InvalidKeySize {
                expected: MIN_SECRET_SIZE,
                actual: secret.len(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(
        &self,
        subject: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(duration)
            .ok_or(TokenError::DurationOutOfRange)?;
        let claims = Claims {
            jti: Uuid::new_v4(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::InvalidToken)?;

        Ok((token, claims.into_payload()?))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::InvalidToken)?;

        let payload = data.claims.into_payload()?;
        payload.validate(Utc::now())?;
        Ok(payload)
    }
}
