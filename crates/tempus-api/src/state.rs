//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tempus_auth::password::PasswordHasher;
use tempus_auth::rbac::RbacEnforcer;
use tempus_auth::session::SessionManager;
use tempus_auth::token::{TokenMaker, build_token_maker};
use tempus_core::config::AuthConfig;
use tempus_core::error::AppError;
use tempus_database::traits::{SessionRepository, UserLookup};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Token issuer and verifier
    pub token_maker: Arc<dyn TokenMaker>,
    /// Login, refresh and revocation flows
    pub session_manager: Arc<SessionManager>,
    /// Role-based access control enforcer
    pub rbac: Arc<RbacEnforcer>,
    /// User lookup
    pub users: Arc<dyn UserLookup>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session_manager", &self.session_manager)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the auth core over the given stores.
    ///
    /// Fails when the configured token key or a token lifetime is unusable.
    pub fn new(
        auth: &AuthConfig,
        users: Arc<dyn UserLookup>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Result<Self, AppError> {
        let token_maker = build_token_maker(auth)?;

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&token_maker),
            Arc::clone(&users),
            sessions,
            Arc::new(PasswordHasher::new()),
            auth,
        )?);
        let rbac = Arc::new(RbacEnforcer::new(Arc::clone(&users)));

        Ok(Self {
            token_maker,
            session_manager,
            rbac,
            users,
        })
    }
}
