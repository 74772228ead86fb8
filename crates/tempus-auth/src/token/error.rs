//! Token error kinds.

use thiserror::Error;

use tempus_core::error::AppError;

/// Failure modes of a [`TokenMaker`](super::TokenMaker).
///
/// `InvalidToken` and `ExpiredToken` are kept apart so callers can report a
/// stale credential differently from a forged one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The symmetric key has the wrong length. Raised at construction only.
    #[error("invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    /// Malformed token or failed authentication tag / signature.
    #[error("token is invalid")]
    InvalidToken,

    /// The token's validity window has passed.
    #[error("token has expired")]
    ExpiredToken,

    /// Issue time plus lifetime falls outside the representable range.
    #[error("token lifetime out of range")]
    DurationOutOfRange,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let message = err.to_string();
        match err {
            TokenError::InvalidKeySize { .. } => AppError::configuration(message),
            TokenError::InvalidToken => AppError::invalid_token(message),
            TokenError::ExpiredToken => AppError::expired_token(message),
            TokenError::DurationOutOfRange => AppError::internal(message),
        }
    }
}
