//! Login, signup and demo user tests.

mod common;

use axum::http::StatusCode;
use easy_emr_persistence::models::Role;
use easy_emr_rest::ServerConfig;
use easy_emr_rest::auth::TokenKeys;
use serde_json::{Value, json};

use common::*;

const BAD_CREDENTIALS: &str = "Incorrect username or password";

#[tokio::test]
async fn test_login_issues_token_with_stored_role() {
    let harness = RestTestHarness::new();
    harness.seed_user("drwho", Role::Physician).await;

    let response = harness.login("drwho", TEST_PASSWORD).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let claims = harness.state.tokens().decode_access_token(token).unwrap();
    assert_eq!(claims.sub, "drwho");
    assert_eq!(claims.role, Role::Physician);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let harness = RestTestHarness::new();
    harness.seed_user("alice", Role::Staff).await;
    harness
        .server
        .post("/demo/create-user")
        .json(&json!({"username": "nopass"}))
        .await
        .assert_status_ok();

    let wrong_password = harness.login("alice", "wrong").await;
    let unknown_user = harness.login("mallory", TEST_PASSWORD).await;
    let no_password = harness.login("nopass", "").await;

    for response in [wrong_password, unknown_user, no_password] {
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({"detail": BAD_CREDENTIALS}));
    }
}

#[tokio::test]
async fn test_login_requires_form_fields() {
    let harness = RestTestHarness::new();

    let response = harness
        .server
        .post("/token")
        .form(&[("username", "alice")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_then_login() {
    let harness = RestTestHarness::new();

    let response = harness.signup("nurse", "pw123", "staff").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["username"], "nurse");
    assert_eq!(body["role"], "staff");
    assert!(body.get("password_hash").is_none());
    assert!(!body["id"].as_str().unwrap().is_empty());

    harness.login("nurse", "pw123").await.assert_status_ok();
    harness
        .login("nurse", "pw1234")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_password_is_stored_hashed() {
    let harness = RestTestHarness::new();
    harness.signup("nurse", "pw123", "staff").await;

    let user = harness
        .state
        .repository()
        .find_user_by_username("nurse")
        .await
        .unwrap()
        .unwrap();
    let hash = user.password_hash.unwrap();
    assert_ne!(hash, "pw123");
    assert!(hash.starts_with("$2"));
}

#[tokio::test]
async fn test_duplicate_signup_rejected() {
    let harness = RestTestHarness::new();
    harness
        .signup("dup", "pw", "admin")
        .await
        .assert_status_ok();

    let response = harness.signup("dup", "other", "staff").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"detail": "Username already registered"})
    );
    assert_eq!(harness.state.repository().list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_signup_rejects_unknown_role() {
    let harness = RestTestHarness::new();

    harness
        .signup("x", "pw", "superuser")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_demo_create_user() {
    let harness = RestTestHarness::new();

    let response = harness
        .server
        .post("/demo/create-user")
        .json(&json!({"username": "demo", "display_name": "Demo Person"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"created": "demo"}));

    let user = harness
        .state
        .repository()
        .find_user_by_username("demo")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Demo Person"));
    assert_eq!(user.password_hash, None);
}

#[tokio::test]
async fn test_demo_route_can_be_disabled() {
    let harness = RestTestHarness::with_config(ServerConfig {
        enable_demo_routes: false,
        ..ServerConfig::for_testing()
    });

    harness
        .server
        .post("/demo/create-user")
        .json(&json!({"username": "demo"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_me() {
    let harness = RestTestHarness::new();
    let token = harness.token_for("alice", Role::Admin).await;

    let response = harness
        .server
        .get("/users/me")
        .authorization_bearer(token)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"username": "alice", "role": "admin"})
    );
}

#[tokio::test]
async fn test_missing_token_is_401_with_challenge() {
    let harness = RestTestHarness::new();

    let response = harness.server.get("/users/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_token_from_other_secret_is_401() {
    let harness = RestTestHarness::new();
    harness.seed_user("alice", Role::Admin).await;
    let forged = TokenKeys::new("some-other-secret")
        .create_access_token("alice", Role::Admin)
        .unwrap();

    harness
        .server
        .get("/users/me")
        .authorization_bearer(forged)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_401() {
    let harness = RestTestHarness::new();
    let token = harness
        .state
        .tokens()
        .create_access_token("ghost", Role::Admin)
        .unwrap();

    let response = harness
        .server
        .get("/users/me")
        .authorization_bearer(token)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({"detail": "User not found"}));
}

#[tokio::test]
async fn test_failed_logins_without_stored_hash_check_the_decoy() {
    let harness = RestTestHarness::new();
    harness.seed_user("alice", Role::Staff).await;

    harness
        .login("alice", "wrong")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(!harness.state.password_decoy().is_primed());

    harness
        .login("mallory", "guess")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(harness.state.password_decoy().is_primed());
}

#[tokio::test]
async fn test_decoy_password_never_logs_in() {
    let harness = RestTestHarness::new();
    harness
        .server
        .post("/demo/create-user")
        .json(&json!({"username": "nopass"}))
        .await
        .assert_status_ok();

    let response = harness.login("nopass", "easy-emr-decoy-password").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({"detail": BAD_CREDENTIALS}));
}
