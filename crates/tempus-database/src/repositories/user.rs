//! User lookups against PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use tempus_core::error::{AppError, ErrorKind};
use tempus_core::result::AppResult;
use tempus_entity::User;

use crate::traits::UserLookup;

const USER_COLUMNS: &str = "id, username, email, name, surname, company_id, team_id, role, \
                            password AS password_hash, created_at";

/// Reads user records for authentication and authorization.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserLookup for PgUserRepository {
    async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))?
        .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
