//! Bearer credential extraction and per-request verification.
//!
//! A request moves `NoCredential -> Extracted -> Verified | Rejected`:
//! [`extract_bearer`] covers the first step and [`authenticate`] the whole
//! sequence. Binding the payload to the request is left to the HTTP layer.

use tracing::debug;

use tempus_core::error::AppError;

use crate::token::{Payload, TokenMaker};

/// Header carrying the credential.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Accepted scheme, compared case-insensitively.
pub const BEARER_SCHEME: &str = "bearer";

const FORMAT_ERROR: &str = "missing/invalid authorization header format";

/// Extracts the token from an `authorization: bearer <token>` header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AppError> {
    let header = header.ok_or_else(|| AppError::invalid_credential_format(FORMAT_ERROR))?;

    let mut fields = header.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            Ok(token)
        }
        _ => Err(AppError::invalid_credential_format(FORMAT_ERROR)),
    }
}

/// Extracts and verifies the bearer credential.
///
/// Errors keep the token maker's kind so callers can tell a bad credential
/// from a stale one.
pub fn authenticate(header: Option<&str>, maker: &dyn TokenMaker) -> Result<Payload, AppError> {
    let token = extract_bearer(header).inspect_err(|e| {
        debug!(kind = %e.kind, "Rejected request credential");
    })?;

    let payload = maker.verify_token(token).map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        AppError::from(e)
    })?;

    debug!(subject = %payload.subject, token_id = %payload.id, "Authenticated request");
    Ok(payload)
}
