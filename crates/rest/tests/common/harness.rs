//! REST API test harness.
//!
//! Provides a configured test server over an in-memory store, plus helpers
//! for seeding accounts and obtaining tokens.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use easy_emr_persistence::backends::memory::MemoryStore;
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::{Role, User};
use serde_json::{Value, json};

use easy_emr_rest::auth::hash_password;
use easy_emr_rest::{AppState, ServerConfig, create_app_with_state};

/// Password given to every account seeded by the harness.
pub const TEST_PASSWORD: &str = "correct horse";

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_read() {
///     let harness = RestTestHarness::new();
///     let token = harness.token_for("doc", Role::Physician).await;
///
///     let response = harness.server.get("/encounters").authorization_bearer(token).await;
///     response.assert_status_ok();
/// }
/// ```
pub struct RestTestHarness<S: DocumentStore + 'static = MemoryStore> {
    /// The test server instance.
    pub server: TestServer,

    /// The application state shared with the server.
    pub state: AppState<S>,
}

impl RestTestHarness<MemoryStore> {
    /// Creates a harness over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates a harness with custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_store(MemoryStore::new(), config)
    }
}

impl<S: DocumentStore + 'static> RestTestHarness<S> {
    /// Creates a harness over any store.
    pub fn with_store(store: S, config: ServerConfig) -> Self {
        Self::with_state(AppState::new(Arc::new(store), config))
    }

    /// Creates a harness from prepared state.
    pub fn with_state(state: AppState<S>) -> Self {
        let app = create_app_with_state(state.clone());
        let server = TestServer::new(app).expect("Failed to create test server");
        Self { server, state }
    }

    /// Seeds a user with [`TEST_PASSWORD`] directly through the repository,
    /// bypassing HTTP so nothing is audited.
    pub async fn seed_user(&self, username: &str, role: Role) -> User {
        let user = User {
            id: format!("user-{username}"),
            username: username.to_string(),
            password_hash: Some(
                hash_password(TEST_PASSWORD, self.state.config().password_hash_cost)
                    .expect("Failed to hash password"),
            ),
            role,
            display_name: None,
        };
        self.state
            .repository()
            .add_user(&user)
            .await
            .expect("Failed to seed user");
        user
    }

    /// Seeds a user and returns a token for it without going through `/token`.
    pub async fn token_for(&self, username: &str, role: Role) -> String {
        self.seed_user(username, role).await;
        self.state
            .tokens()
            .create_access_token(username, role)
            .expect("Failed to issue token")
    }

    /// Posts a login form.
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.server
            .post("/token")
            .form(&[("username", username), ("password", password)])
            .await
    }

    /// Posts a signup request.
    pub async fn signup(&self, username: &str, password: &str, role: &str) -> TestResponse {
        self.server
            .post("/signup")
            .json(&json!({"username": username, "password": password, "role": role}))
            .await
    }

    /// Fetches the audit log with the given query string.
    pub async fn audit(&self, query: &str) -> Value {
        let response = self.server.get(&format!("/audit{query}")).await;
        response.assert_status_ok();
        response.json::<Value>()
    }
}

/// The reference patient used across scenarios.
pub fn john_doe() -> Value {
    json!({
        "id": "p1",
        "first_name": "John",
        "last_name": "Doe",
        "dob": "1990-01-01",
        "gender": "M"
    })
}
