//! Capability traits consumed by the authentication core.
//!
//! Each consumer depends only on the capability it needs, so test doubles
//! stay minimal. Implementations must report absence as
//! [`ErrorKind::NotFound`](tempus_core::ErrorKind::NotFound) and every other
//! failure as [`ErrorKind::Database`](tempus_core::ErrorKind::Database).

use async_trait::async_trait;
use uuid::Uuid;

use tempus_core::AppResult;
use tempus_entity::{CreateSession, Session, User};

/// Read access to user records.
#[async_trait]
pub trait UserLookup: Send + Sync + 'static {
    /// Fetch a user by unique username.
    async fn get_user_by_username(&self, username: &str) -> AppResult<User>;

    /// Fetch a user by id.
    async fn get_user(&self, id: i64) -> AppResult<User>;
}

/// Durable record of issued refresh tokens.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Persist a new session and return the stored row.
    async fn create_session(&self, params: CreateSession) -> AppResult<Session>;

    /// Fetch a session by id.
    async fn get_session(&self, id: Uuid) -> AppResult<Session>;

    /// Mark a session as blocked and return the updated row.
    async fn block_session(&self, id: Uuid) -> AppResult<Session>;
}
