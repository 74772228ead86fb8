//! Issue and verify signed, time-bounded credentials.
//!
//! Two constructions implement [`TokenMaker`]: [`SealedTokenMaker`]
//! (AES-256-GCM, payload encrypted and authenticated) and [`JwtMaker`]
//! (HS256, payload signed only).

pub mod error;
pub mod jwt;
pub mod payload;
pub mod sealed;

use std::sync::Arc;

use chrono::Duration;

use tempus_core::config::auth::{AuthConfig, TokenKind};

pub use error::TokenError;
pub use jwt::JwtMaker;
pub use payload::Payload;
pub use sealed::SealedTokenMaker;

/// Stateless credential issuer and verifier.
///
/// Implementations are pure functions of their key, the input and the wall
/// clock, and are safe to share across request tasks.
pub trait TokenMaker: Send + Sync + 'static {
    /// Issue a token for `subject` valid for `duration` from now.
    ///
    /// A zero or negative duration yields a token that is already expired.
    fn create_token(&self, subject: &str, duration: Duration)
    -> Result<(String, Payload), TokenError>;

    /// Verify a token and return its payload.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

/// Builds the configured token maker, rejecting unusable keys up front.
pub fn build_token_maker(config: &AuthConfig) -> Result<Arc<dyn TokenMaker>, TokenError> {
    let key = config.token_symmetric_key.as_bytes();
    Ok(match config.token_kind {
        TokenKind::Sealed => Arc::new(SealedTokenMaker::new(key)?),
        TokenKind::Jwt => Arc::new(JwtMaker::new(key)?),
    })
}
