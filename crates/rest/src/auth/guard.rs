//! Authentication extractors.
//!
//! [`CurrentUser`] resolves the bearer token on a request to a known user;
//! [`RequireRole`] additionally demands one exact role. There is no role
//! hierarchy: an admin is refused on a physician-only route.
//!
//! ```rust,ignore
//! async fn list_encounters(
//!     RequireRole(user, ..): RequireRole<PhysicianOnly>,
//! ) -> RestResult<Json<Vec<Encounter>>> { ... }
//! ```

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::Role;
use serde::Serialize;
use tracing::debug;

use super::AuthError;
use crate::error::RestError;
use crate::state::AppState;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    /// Username from the token subject.
    pub username: String,
    /// Role from the token.
    pub role: Role,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
    S: DocumentStore + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;
        let claims = state.tokens().decode_access_token(token)?;

        if state
            .repository()
            .find_user_by_username(&claims.sub)
            .await?
            .is_none()
        {
            debug!(username = %claims.sub, "Token subject no longer exists");
            return Err(AuthError::UnknownUser.into());
        }

        Ok(CurrentUser {
            username: claims.sub,
            role: claims.role,
        })
    }
}

/// A role a route can demand.
pub trait RoleRequirement: Send + Sync + 'static {
    /// The required role.
    const ROLE: Role;
}

/// Requires [`Role::Admin`].
#[derive(Debug)]
pub struct AdminOnly;

/// Requires [`Role::Physician`].
#[derive(Debug)]
pub struct PhysicianOnly;

/// Requires [`Role::Staff`].
#[derive(Debug)]
pub struct StaffOnly;

impl RoleRequirement for AdminOnly {
    const ROLE: Role = Role::Admin;
}

impl RoleRequirement for PhysicianOnly {
    const ROLE: Role = Role::Physician;
}

impl RoleRequirement for StaffOnly {
    const ROLE: Role = Role::Staff;
}

/// An authenticated caller whose role is exactly `R::ROLE`.
#[derive(Debug)]
pub struct RequireRole<R: RoleRequirement>(pub CurrentUser, pub PhantomData<R>);

impl<R: RoleRequirement> RequireRole<R> {
    /// Checks `user` against the requirement.
    pub fn check(user: CurrentUser) -> Result<Self, AuthError> {
        if user.role == R::ROLE {
            Ok(RequireRole(user, PhantomData))
        } else {
            Err(AuthError::RoleMismatch {
                required: R::ROLE,
                actual: user.role,
            })
        }
    }

    /// Returns the authenticated caller.
    pub fn user(&self) -> &CurrentUser {
        &self.0
    }
}

impl<S, R> FromRequestParts<AppState<S>> for RequireRole<R>
where
    S: DocumentStore + 'static,
    R: RoleRequirement,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        Ok(Self::check(user)?)
    }
}
