//! Session persistence against PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use tempus_core::error::{AppError, ErrorKind};
use tempus_core::result::AppResult;
use tempus_entity::{CreateSession, Session};

use crate::traits::SessionRepository;

/// Repository for session create, lookup and block operations.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create_session(&self, params: CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at, created_at",
        )
        .bind(params.id)
        .bind(&params.username)
        .bind(&params.refresh_token)
        .bind(&params.user_agent)
        .bind(&params.client_ip)
        .bind(params.is_blocked)
        .bind(params.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))
    }

    async fn get_session(&self, id: Uuid) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "SELECT id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at, created_at \
             FROM sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))?
        .ok_or_else(|| AppError::not_found(format!("Session {id} not found")))
    }

    async fn block_session(&self, id: Uuid) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "UPDATE sessions SET is_blocked = TRUE WHERE id = $1 \
             RETURNING id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to block session", e))?
        .ok_or_else(|| AppError::not_found(format!("Session {id} not found")))
    }
}
