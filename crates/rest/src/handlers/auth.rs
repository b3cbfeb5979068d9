//! Login and signup handlers.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::{Role, User, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::{hash_password, verify_password};
use crate::error::{RestError, RestResult};
use crate::extractors::JsonBody;
use crate::state::AppState;

/// Detail for every failed login, whatever the cause.
pub const INCORRECT_CREDENTIALS: &str = "Incorrect username or password";

/// Detail for a signup with a taken username.
pub const USERNAME_TAKEN: &str = "Username already registered";

/// Form body of `POST /token`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Body returned by `POST /token`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

/// JSON body of `POST /signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Login name; must not be taken.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Role granted to the account.
    pub role: Role,
    /// Optional human-readable name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Handler for password login.
///
/// Unknown users, users without a password and wrong passwords all get the
/// same 400 after the same bcrypt work, so neither the response nor its
/// timing reveals which usernames exist.
///
/// # HTTP Request
///
/// `POST /token` with form fields `username` and `password`
///
/// # Response
///
/// - `200 OK` - `{"access_token": "...", "token_type": "bearer"}`
/// - `400 Bad Request` - Incorrect username or password
pub async fn token_handler<S>(
    State(state): State<AppState<S>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> RestResult<Json<TokenResponse>>
where
    S: DocumentStore + 'static,
{
    let Form(form) = form?;
    debug!(username = %form.username, "Processing login request");

    let user = state
        .repository()
        .find_user_by_username(&form.username)
        .await?;

    let stored_hash = user.as_ref().and_then(|user| user.password_hash.clone());
    let decoy = Arc::clone(state.password_decoy());
    let password = form.password;
    let verified = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => decoy.verify(&password),
    })
    .await
    .map_err(|e| RestError::internal(format!("password check task failed: {e}")))?;

    let Some(user) = user.filter(|_| verified) else {
        return Err(RestError::bad_request(INCORRECT_CREDENTIALS));
    };

    let access_token = state
        .tokens()
        .create_access_token(&user.username, user.role)?;
    info!(username = %user.username, role = %user.role, "Issued access token");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Handler for account signup.
///
/// The uniqueness check and the insert are not atomic; two concurrent
/// signups for the same name can both succeed.
///
/// # HTTP Request
///
/// `POST /signup` with JSON `{"username", "password", "role"}`
///
/// # Response
///
/// - `200 OK` - The new account, without its password hash
/// - `400 Bad Request` - Username already registered, or invalid body
pub async fn signup_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> RestResult<Json<UserProfile>>
where
    S: DocumentStore + 'static,
{
    debug!(username = %request.username, role = %request.role, "Processing signup request");

    if request.password.is_empty() {
        return Err(RestError::bad_request("Password must not be empty"));
    }

    if state
        .repository()
        .find_user_by_username(&request.username)
        .await?
        .is_some()
    {
        return Err(RestError::bad_request(USERNAME_TAKEN));
    }

    let cost = state.config().password_hash_cost;
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| RestError::internal(format!("password hash task failed: {e}")))??;

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: request.username,
        password_hash: Some(password_hash),
        role: request.role,
        display_name: request.display_name,
    };
    state.repository().add_user(&user).await?;
    info!(username = %user.username, role = %user.role, "Registered user");

    Ok(Json(user.profile()))
}
