//! Session lifecycle manager: login, refresh and revocation flows.
//!
//! The manager holds no mutable state of its own. Each flow performs a
//! bounded number of store calls and surfaces store failures immediately,
//! without retrying.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use tempus_core::config::AuthConfig;
use tempus_core::error::{AppError, ErrorKind};
use tempus_database::traits::{SessionRepository, UserLookup};
use tempus_entity::{CreateSession, User};

use crate::context::RequestContext;
use crate::password::PasswordHasher;
use crate::rbac::is_admin;
use crate::token::{Payload, TokenMaker};

/// Credentials and request metadata for a login attempt.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub user_agent: String,
    pub client_ip: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// Id of the created session, equal to the refresh payload id.
    pub session_id: Uuid,
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Result of a successful refresh. The refresh token is not rotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResult {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

/// Orchestrates the session flows over the token maker and the stores.
#[derive(Clone)]
pub struct SessionManager {
    /// Token issuer shared with the authentication layer.
    token_maker: Arc<dyn TokenMaker>,
    /// User lookup.
    users: Arc<dyn UserLookup>,
    /// Session persistence.
    sessions: Arc<dyn SessionRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    access_token_duration: Duration,
    refresh_token_duration: Duration,
    /// Hash checked against when the username is unknown, so both login
    /// failures cost one Argon2 verification.
    dummy_hash: String,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("access_token_duration", &self.access_token_duration)
            .field("refresh_token_duration", &self.refresh_token_duration)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager with durations taken from `auth_config`.
    ///
    /// Fails with `Configuration` when a configured lifetime is out of range.
    pub fn new(
        token_maker: Arc<dyn TokenMaker>,
        users: Arc<dyn UserLookup>,
        sessions: Arc<dyn SessionRepository>,
        password_hasher: Arc<PasswordHasher>,
        auth_config: &AuthConfig,
    ) -> Result<Self, AppError> {
        let dummy_hash = password_hasher.hash_password(&Uuid::new_v4().to_string())?;

        Ok(Self {
            token_maker,
            users,
            sessions,
            password_hasher,
            access_token_duration: auth_config.access_token_duration()?,
            refresh_token_duration: auth_config.refresh_token_duration()?,
            dummy_hash,
        })
    }

    /// Performs the login flow:
    ///
    /// 1. Look up the user by username (`NotFound` if absent)
    /// 2. Check the password (`Unauthorized` on mismatch)
    /// 3. Issue an access token and a refresh token
    /// 4. Persist a session keyed by the refresh payload id
    pub async fn login(&self, input: LoginInput) -> Result<LoginResult, AppError> {
        let user = match self.users.get_user_by_username(&input.username).await {
            Ok(user) => user,
            Err(e) if e.is(ErrorKind::NotFound) => {
                let _ = self
                    .password_hasher
                    .verify_password(&input.password, &self.dummy_hash);
                warn!(client_ip = %input.client_ip, "Login failed: unknown user");
                return Err(e);
            }
            Err(e) => return Err(store_error(e, "user lookup")),
        };

        let password_valid = self
            .password_hasher
            .verify_password(&input.password, &user.password_hash)?;

        if !password_valid {
            warn!(username = %user.username, client_ip = %input.client_ip, "Login failed: wrong password");
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let (access_token, access_payload) =
            self.issue(&user.username, self.access_token_duration)?;
        let (refresh_token, refresh_payload) =
            self.issue(&user.username, self.refresh_token_duration)?;

        let session = self
            .sessions
            .create_session(CreateSession {
                id: refresh_payload.id,
                username: user.username.clone(),
                refresh_token: refresh_token.clone(),
                user_agent: input.user_agent,
                client_ip: input.client_ip,
                is_blocked: false,
                expires_at: refresh_payload.expires_at,
            })
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to create session", e))?;

        info!(
            username = %user.username,
            session_id = %session.id,
            "Login successful"
        );

        Ok(LoginResult {
            session_id: session.id,
            access_token,
            access_token_expires_at: access_payload.expires_at,
            refresh_token,
            refresh_token_expires_at: refresh_payload.expires_at,
            user,
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// 1. Reject an empty token (`BadRequest`) without touching the store
    /// 2. Verify the token (`Unauthorized` if invalid or expired)
    /// 3. Load the session by payload id (`NotFound` if absent)
    /// 4. Check token equality, subject, block state and expiry, in that order
    /// 5. Issue a new access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AppError> {
        if refresh_token.is_empty() {
            return Err(AppError::bad_request("refresh_token is required"));
        }

        let payload = self
            .token_maker
            .verify_token(refresh_token)
            .map_err(|e| AppError::unauthorized(format!("Invalid refresh token: {e}")))?;

        let session = self
            .sessions
            .get_session(payload.id)
            .await
            .map_err(|e| store_error(e, "session lookup"))?;

        if session.refresh_token != refresh_token {
            warn!(session_id = %session.id, "Refresh rejected: token mismatch");
            return Err(AppError::unauthorized("Mismatched session token"));
        }

        if session.username != payload.subject {
            warn!(session_id = %session.id, "Refresh rejected: subject mismatch");
            return Err(AppError::unauthorized("Incorrect session user"));
        }

        if session.is_blocked {
            warn!(session_id = %session.id, username = %session.username, "Refresh rejected: session blocked");
            return Err(AppError::unauthorized("Session is blocked"));
        }

        if !session.is_live_at(Utc::now()) {
            return Err(AppError::unauthorized("Session has expired"));
        }

        let (access_token, access_payload) =
            self.issue(&payload.subject, self.access_token_duration)?;

        info!(
            username = %payload.subject,
            session_id = %session.id,
            "Access token refreshed"
        );

        Ok(RefreshResult {
            access_token,
            access_token_expires_at: access_payload.expires_at,
        })
    }

    /// Blocks a session so its refresh token can no longer be exchanged.
    ///
    /// Users may revoke their own sessions; admins may revoke any session.
    pub async fn revoke(&self, ctx: &RequestContext, session_id: Uuid) -> Result<(), AppError> {
        let subject = ctx.subject()?;

        let session = self
            .sessions
            .get_session(session_id)
            .await
            .map_err(|e| store_error(e, "session lookup"))?;

        if session.username != subject {
            let actor = self.users.get_user_by_username(subject).await.map_err(|e| {
                AppError::actor_not_found(format!(
                    "cannot resolve actor '{subject}': {}",
                    e.message
                ))
            })?;

            if !is_admin(&actor) {
                warn!(actor = %subject, session_id = %session_id, "Revoke denied: not owner");
                return Err(AppError::forbidden("Cannot revoke another user's session"));
            }
        }

        self.sessions
            .block_session(session_id)
            .await
            .map_err(|e| store_error(e, "session update"))?;

        info!(
            actor = %subject,
            username = %session.username,
            session_id = %session_id,
            "Session revoked"
        );

        Ok(())
    }

    fn issue(&self, subject: &str, duration: Duration) -> Result<(String, Payload), AppError> {
        self.token_maker
            .create_token(subject, duration)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to create token", e))
    }
}

/// Keeps `NotFound` and turns every other store failure into `Internal`.
fn store_error(err: AppError, what: &str) -> AppError {
    if err.is(ErrorKind::NotFound) {
        err
    } else {
        AppError::with_source(ErrorKind::Internal, format!("{what} failed"), err)
    }
}
