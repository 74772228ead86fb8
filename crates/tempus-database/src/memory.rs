//! In-memory store implementations backed by `DashMap`.
//!
//! Used by tests and by local runs without PostgreSQL. Semantics match the
//! PostgreSQL repositories: absent rows are `NotFound`, duplicate session
//! ids are a `Database` error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use tempus_core::error::AppError;
use tempus_core::result::AppResult;
use tempus_entity::{CreateSession, Session, User};

use crate::traits::{SessionRepository, UserLookup};

/// In-memory user table keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<i64, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: User) {
        self.users.insert(user.id, user);
    }
}

#[async_trait]
impl UserLookup for MemoryUserStore {
    async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        self.users
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}

/// In-memory session table keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a session row directly.
    pub fn insert(&self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    /// Snapshot of a stored session.
    pub fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` when no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionStore {
    async fn create_session(&self, params: CreateSession) -> AppResult<Session> {
        match self.sessions.entry(params.id) {
            Entry::Occupied(_) => Err(AppError::database(format!(
                "Session {} already exists",
                params.id
            ))),
            Entry::Vacant(slot) => {
                let session = params.into_session(Utc::now());
                debug!(session_id = %session.id, username = %session.username, "Stored session");
                slot.insert(session.clone());
                Ok(session)
            }
        }
    }

    async fn get_session(&self, id: Uuid) -> AppResult<Session> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Session {id} not found")))
    }

    async fn block_session(&self, id: Uuid) -> AppResult<Session> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Session {id} not found")))?;
        entry.is_blocked = true;
        Ok(entry.clone())
    }
}
