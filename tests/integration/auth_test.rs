//! Integration tests for login, refresh, revocation and bearer authentication.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;
use tempus_auth::token::TokenMaker;
use tempus_core::config::TokenKind;
use tempus_entity::AccessRole;
use uuid::Uuid;

use helpers::TestApp;

fn app_with_ana() -> TestApp {
    let app = TestApp::new();
    app.create_user(1, "ana", "password123", AccessRole::Default, Some(1));
    app.create_user(2, "marko", "password123", AccessRole::Default, Some(1));
    app
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_login_success() {
    let app = app_with_ana();
    let body = app.login("ana", "password123").await;

    for field in [
        "session_id",
        "access_token",
        "access_token_expires_at",
        "refresh_token",
        "refresh_token_expires_at",
    ] {
        assert!(body.get(field).is_some(), "missing {field}");
    }
    assert_eq!(body["user"]["username"], "ana");
    assert!(body["user"].get("password_hash").is_none());

    let session_id: Uuid = body["session_id"].as_str().unwrap().parse().unwrap();
    let session = app.sessions.get(session_id).expect("session stored");
    assert_eq!(session.client_ip, "203.0.113.9");
    assert_eq!(session.user_agent, "tempus-tests/1.0");
    assert!(!session.is_blocked);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = app_with_ana();

    let wrong_password = app
        .request(
            "POST",
            "/api/users/login",
            Some(serde_json::json!({"username": "ana", "password": "wrong"})),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/users/login",
            Some(serde_json::json!({"username": "nobody", "password": "password123"})),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.body["message"], "authentication failed");
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn test_login_validation() {
    let app = app_with_ana();

    for body in [
        serde_json::json!({"username": "a n a", "password": "password123"}),
        serde_json::json!({"username": "", "password": "password123"}),
        serde_json::json!({"username": "ana", "password": ""}),
    ] {
        let response = app.request("POST", "/api/users/login", Some(body), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "VALIDATION");
    }
}

#[tokio::test]
async fn test_me_with_access_token() {
    let app = app_with_ana();
    let token = app.access_token("ana", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "ana");
    assert_eq!(response.body["role"], "default");
}

#[tokio::test]
async fn test_bearer_header_format() {
    let app = app_with_ana();
    let token = app.access_token("ana", "password123").await;

    let lowercase = format!("bearer {token}");
    let response = app
        .request_with_header("GET", "/api/auth/me", None, Some(&lowercase))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let basic = format!("Basic {token}");
    let extra = format!("Bearer {token} extra");
    for header in [None, Some(basic.as_str()), Some(token.as_str()), Some(extra.as_str())] {
        let response = app
            .request_with_header("GET", "/api/auth/me", None, header)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["error"], "INVALID_CREDENTIAL_FORMAT");
        assert_eq!(
            response.body["message"],
            "missing/invalid authorization header format"
        );
    }
}

#[tokio::test]
async fn test_invalid_and_expired_tokens_differ() {
    let app = app_with_ana();

    let response = app
        .request("GET", "/api/auth/me", None, Some("v1.local.garbage"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "INVALID_TOKEN");

    let (expired, _) = app
        .maker
        .create_token("ana", -Duration::minutes(1))
        .unwrap();
    let response = app.request("GET", "/api/auth/me", None, Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "EXPIRED_TOKEN");
}

#[tokio::test]
async fn test_refresh_issues_usable_access_token() {
    let app = app_with_ana();
    let login = app.login("ana", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/tokens/refresh",
            Some(serde_json::json!({"refresh_token": login["refresh_token"]})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("refresh_token").is_none());

    let access = response.body["access_token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "ana");
}

#[tokio::test]
async fn test_refresh_failures() {
    let app = app_with_ana();
    let login = app.login("ana", "password123").await;

    let missing = app
        .request("POST", "/api/tokens/refresh", Some(serde_json::json!({})), None)
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let garbage = app
        .request(
            "POST",
            "/api/tokens/refresh",
            Some(serde_json::json!({"refresh_token": "garbage"})),
            None,
        )
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    // A structurally valid token for the same subject with no session behind it.
    let (stray, _) = app.maker.create_token("ana", Duration::hours(1)).unwrap();
    let stray = app
        .request(
            "POST",
            "/api/tokens/refresh",
            Some(serde_json::json!({"refresh_token": stray})),
            None,
        )
        .await;
    assert_eq!(stray.status, StatusCode::UNAUTHORIZED);
    assert_eq!(stray.body["message"], "authentication failed");

    // Access tokens are not refresh tokens.
    let wrong_kind = app
        .request(
            "POST",
            "/api/tokens/refresh",
            Some(serde_json::json!({"refresh_token": login["access_token"]})),
            None,
        )
        .await;
    assert_eq!(wrong_kind.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoke_own_session_blocks_refresh() {
    let app = app_with_ana();
    let login = app.login("ana", "password123").await;
    let access = login["access_token"].as_str().unwrap();
    let session_id = login["session_id"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/revoke"),
            None,
            Some(access),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let refresh = app
        .request(
            "POST",
            "/api/tokens/refresh",
            Some(serde_json::json!({"refresh_token": login["refresh_token"]})),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoke_requires_ownership() {
    let app = app_with_ana();
    let login = app.login("ana", "password123").await;
    let session_id = login["session_id"].as_str().unwrap();
    let marko = app.access_token("marko", "password123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/revoke"),
            None,
            Some(&marko),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{}/revoke", Uuid::new_v4()),
            None,
            Some(&marko),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("POST", &format!("/api/sessions/{session_id}/revoke"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_jwt_tokens_end_to_end() {
    let app = TestApp::with_kind(TokenKind::Jwt);
    app.create_user(1, "ana", "password123", AccessRole::Default, None);

    let login = app.login("ana", "password123").await;
    let access = login["access_token"].as_str().unwrap();
    assert!(!access.starts_with("v1.local."));

    let me = app.request("GET", "/api/auth/me", None, Some(access)).await;
    assert_eq!(me.status, StatusCode::OK);

    let refresh = app
        .request(
            "POST",
            "/api/tokens/refresh",
            Some(serde_json::json!({"refresh_token": login["refresh_token"]})),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_out_of_range_token_lifetime_is_rejected_at_startup() {
    use std::sync::Arc;

    use tempus_api::AppState;
    use tempus_core::ErrorKind;
    use tempus_database::{MemorySessionStore, MemoryUserStore};

    let mut config = helpers::auth_config(TokenKind::Sealed);
    config.refresh_token_duration_hours = 10_000_000_000;

    let err = AppState::new(
        &config,
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemorySessionStore::new()),
    )
    .unwrap_err();
    assert!(err.is(ErrorKind::Configuration));
}
