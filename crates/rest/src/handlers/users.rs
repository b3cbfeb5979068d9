//! Account handlers.

use axum::{Json, extract::State};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::UserProfile;

use crate::auth::{AdminOnly, CurrentUser, RequireRole};
use crate::error::RestResult;
use crate::state::AppState;

/// `GET /users/me`: the caller's username and role.
pub async fn me_handler(user: CurrentUser) -> Json<CurrentUser> {
    Json(user)
}

/// `GET /admin/users`: every account, without password hashes. Admin only.
pub async fn list_users_handler<S>(
    RequireRole(admin, ..): RequireRole<AdminOnly>,
    State(state): State<AppState<S>>,
) -> RestResult<Json<Vec<UserProfile>>>
where
    S: DocumentStore + 'static,
{
    tracing::debug!(admin = %admin.username, "Listing users");

    let users = state.repository().list_users().await?;
    Ok(Json(users.iter().map(|user| user.profile()).collect()))
}
