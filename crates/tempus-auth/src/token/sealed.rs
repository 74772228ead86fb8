//! AES-256-GCM sealed tokens.
//!
//! Wire format: `v1.local.` followed by unpadded URL-safe base64 of
//! `nonce (12 bytes) || ciphertext || tag (16 bytes)`. The header is bound as
//! associated data, so a token cannot be replayed under a different header.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng, Payload as AeadPayload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};

use super::TokenMaker;
use super::error::TokenError;
use super::payload::Payload;

/// Token header and associated data.
const HEADER: &str = "v1.local.";

/// Required key length in bytes.
pub const KEY_SIZE: usize = 32;

const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// Seals payloads with a process-wide symmetric key.
#[derive(Clone)]
pub struct SealedTokenMaker {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for SealedTokenMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedTokenMaker").finish_non_exhaustive()
    }
}

impl SealedTokenMaker {
    /// Creates a maker from a key of exactly [`KEY_SIZE`] bytes.
    pub fn new(key: &[u8]) -> Result<Self, TokenError> {
        if key.len() != KEY_SIZE {
            return Err(TokenError::InvalidKeySize {
                expected: KEY_SIZE,
                actual: key.len(),
            });
        }
        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| TokenError::InvalidKeySize {
            expected: KEY_SIZE,
            actual: key.len(),
        })?;
        Ok(Self { cipher })
    }

    fn open(&self, token: &str) -> Result<Payload, TokenError> {
        let body = token.strip_prefix(HEADER).ok_or(TokenError::InvalidToken)?;
        let raw = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| TokenError::InvalidToken)?;
        if raw.len() < NONCE_SIZE + TAG_SIZE {
            return Err(TokenError::InvalidToken);
        }

        let (nonce, sealed) = raw.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce),
                AeadPayload {
                    msg: sealed,
                    aad: HEADER.as_bytes(),
                },
            )
            .map_err(|_| TokenError::InvalidToken)?;

        serde_json::from_slice(&plaintext).map_err(|_| TokenError::InvalidToken)
    }
}

impl TokenMaker for SealedTokenMaker {
    fn create_token(
        &self,
        subject: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(subject, duration, Utc::now())?;
        let plaintext = serde_json::to_vec(&payload).map_err(|_| TokenError::InvalidToken)?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(
                &nonce,
                AeadPayload {
                    msg: &plaintext,
                    aad: HEADER.as_bytes(),
                },
            )
            .map_err(|_| TokenError::InvalidToken)?;

        let mut raw = Vec::with_capacity(NONCE_SIZE + sealed.len());
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&sealed);

        Ok((format!("{HEADER}{}", URL_SAFE_NO_PAD.encode(raw)), payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let payload = self.open(token)?;
        payload.validate(Utc::now())?;
        Ok(payload)
    }
}
