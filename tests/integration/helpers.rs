//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use tempus_api::{AppState, build_app};
use tempus_auth::password::PasswordHasher;
use tempus_auth::token::{TokenMaker, build_token_maker};
use tempus_core::config::{AuthConfig, TokenKind};
use tempus_database::{MemorySessionStore, MemoryUserStore};
use tempus_entity::{AccessRole, User};

pub const KEY: &str = "0123456789abcdef0123456789abcdef";

/// Test application over in-memory stores
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User table
    pub users: MemoryUserStore,
    /// Session table
    pub sessions: MemorySessionStore,
    /// A maker sharing the server's key, for forging edge-case tokens
    pub maker: Arc<dyn TokenMaker>,
}

/// Captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub fn auth_config(kind: TokenKind) -> AuthConfig {
    AuthConfig {
        token_symmetric_key: KEY.to_string(),
        token_kind: kind,
        access_token_duration_minutes: 15,
        refresh_token_duration_hours: 24,
    }
}

impl TestApp {
    /// Create a test application using sealed tokens
    pub fn new() -> Self {
        Self::with_kind(TokenKind::Sealed)
    }

    /// Create a test application using the given token kind
    pub fn with_kind(kind: TokenKind) -> Self {
        let config = auth_config(kind);
        let users = MemoryUserStore::new();
        let sessions = MemorySessionStore::new();

        let state = AppState::new(
            &config,
            Arc::new(users.clone()),
            Arc::new(sessions.clone()),
        )
        .expect("Failed to build app state");

        Self {
            router: build_app(state),
            users,
            sessions,
            maker: build_token_maker(&config).expect("Failed to build token maker"),
        }
    }

    /// Create a user with a hashed password
    pub fn create_user(
        &self,
        id: i64,
        username: &str,
        password: &str,
        role: AccessRole,
        company_id: Option<i64>,
    ) {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");

        self.users.insert(User {
            id,
            username: username.to_string(),
            email: format!("{username}@test.com"),
            name: username.to_string(),
            surname: "Test".to_string(),
            company_id,
            team_id: None,
            role,
            password_hash: hash,
            created_at: Utc::now(),
        });
    }

    /// Login and return the response body
    pub async fn login(&self, username: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/users/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body
    }

    /// Login and return the access token
    pub async fn access_token(&self, username: &str, password: &str) -> String {
        self.login(username, password).await["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    /// Make an HTTP request, optionally with a bearer token
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let auth = token.map(|t| format!("Bearer {t}"));
        self.request_with_header(method, uri, body, auth.as_deref())
            .await
    }

    /// Make an HTTP request with a raw authorization header
    pub async fn request_with_header(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::USER_AGENT, "tempus-tests/1.0")
            .header("x-forwarded-for", "203.0.113.9");

        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
