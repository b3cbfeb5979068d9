//! Demo-only user creation.
//!
//! Mounted only when `EMR_ENABLE_DEMO_ROUTES` is on. Accounts created here
//! have no password and cannot log in.

use axum::{Json, extract::State};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::{Role, User};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::error::RestResult;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// JSON body of `POST /demo/create-user`.
#[derive(Debug, Deserialize)]
pub struct DemoUserRequest {
    /// Login name.
    pub username: String,
    /// Optional human-readable name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Handler for one-click demo user creation.
///
/// The user gets the `staff` role. No uniqueness check is made.
///
/// # HTTP Request
///
/// `POST /demo/create-user`
///
/// # Response
///
/// - `200 OK` - `{"created": "<username>"}`
pub async fn create_demo_user_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(request): JsonBody<DemoUserRequest>,
) -> RestResult<Json<Value>>
where
    S: DocumentStore + 'static,
{
    warn!(username = %request.username, "Creating demo user without credentials");

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: request.username,
        password_hash: None,
        role: Role::Staff,
        display_name: request.display_name,
    };
    state.repository().add_user(&user).await?;

    Ok(Json(json!({ "created": user.username })))
}
