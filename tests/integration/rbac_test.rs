//! Integration tests for scoped access to user records.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;
use tempus_auth::token::TokenMaker;
use tempus_entity::AccessRole;

use helpers::TestApp;

/// Two companies: ana and marko work for 1, ivan for 2.
fn app() -> TestApp {
    let app = TestApp::new();
    app.create_user(1, "root", "password123", AccessRole::SuperUser, None);
    app.create_user(2, "boss", "password123", AccessRole::Admin, None);
    app.create_user(3, "lead", "password123", AccessRole::CompanyAdmin, Some(1));
    app.create_user(4, "ana", "password123", AccessRole::Default, Some(1));
    app.create_user(5, "marko", "password123", AccessRole::TeamManager, Some(1));
    app.create_user(6, "ivan", "password123", AccessRole::Default, Some(2));
    app
}

async fn get_user(app: &TestApp, token: &str, id: i64) -> StatusCode {
    app.request("GET", &format!("/api/users/{id}"), None, Some(token))
        .await
        .status
}

#[tokio::test]
async fn test_self_access_for_lowest_role() {
    let app = app();
    let ana = app.access_token("ana", "password123").await;

    let response = app.request("GET", "/api/users/4", None, Some(&ana)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "ana");
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_default_user_cannot_read_others() {
    let app = app();
    let ana = app.access_token("ana", "password123").await;

    let response = app.request("GET", "/api/users/6", None, Some(&ana)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_team_manager_has_no_company_scope() {
    let app = app();
    let marko = app.access_token("marko", "password123").await;
    assert_eq!(get_user(&app, &marko, 4).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_company_admin_scope() {
    let app = app();
    let lead = app.access_token("lead", "password123").await;

    assert_eq!(get_user(&app, &lead, 4).await, StatusCode::OK);
    assert_eq!(get_user(&app, &lead, 5).await, StatusCode::OK);
    assert_eq!(get_user(&app, &lead, 6).await, StatusCode::FORBIDDEN);
    // Global admins have no company, which is not a match.
    assert_eq!(get_user(&app, &lead, 2).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admins_reach_every_company() {
    let app = app();
    for admin in ["root", "boss"] {
        let token = app.access_token(admin, "password123").await;
        assert_eq!(get_user(&app, &token, 4).await, StatusCode::OK);
        assert_eq!(get_user(&app, &token, 6).await, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_missing_target_fails_closed() {
    let app = app();
    let boss = app.access_token("boss", "password123").await;
    assert_eq!(get_user(&app, &boss, 404).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_actor_is_denied() {
    let app = app();
    let (ghost, _) = app.maker.create_token("ghost", Duration::minutes(5)).unwrap();

    let me = app.request("GET", "/api/auth/me", None, Some(&ghost)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.body["error"], "ACTOR_NOT_FOUND");

    assert_eq!(get_user(&app, &ghost, 4).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_can_revoke_any_session() {
    let app = app();
    let login = app.login("ana", "password123").await;
    let session_id = login["session_id"].as_str().unwrap();
    let boss = app.access_token("boss", "password123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/revoke"),
            None,
            Some(&boss),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_directory_requires_admin_role() {
    let app = app();

    for admin in ["root", "boss"] {
        let token = app.access_token(admin, "password123").await;
        let response = app
            .request("GET", "/api/users/by-username/ivan", None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["id"], 6);
    }

    for user in ["lead", "marko", "ana"] {
        let token = app.access_token(user, "password123").await;
        let response = app
            .request("GET", "/api/users/by-username/ivan", None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{user}");
    }
}

#[tokio::test]
async fn test_company_members_scope() {
    let app = app();
    let lead = app.access_token("lead", "password123").await;

    let response = app
        .request("GET", "/api/companies/1/users/4", None, Some(&lead))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "ana");

    // Another company's members are out of reach.
    let response = app
        .request("GET", "/api/companies/2/users/6", None, Some(&lead))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // A member of another company does not show up under this one.
    let response = app
        .request("GET", "/api/companies/1/users/6", None, Some(&lead))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let ana = app.access_token("ana", "password123").await;
    let response = app
        .request("GET", "/api/companies/1/users/4", None, Some(&ana))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let boss = app.access_token("boss", "password123").await;
    let response = app
        .request("GET", "/api/companies/2/users/6", None, Some(&boss))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
