//! Authentication and authorization.
//!
//! - [`password`] - bcrypt hashing and verification
//! - [`token`] - HS256 access tokens
//! - [`guard`] - the [`CurrentUser`] and [`RequireRole`] extractors

pub mod guard;
pub mod password;
pub mod token;

pub use guard::{AdminOnly, CurrentUser, PhysicianOnly, RequireRole, RoleRequirement, StaffOnly};
pub use password::{DecoyHash, hash_password, verify_password};
pub use token::{ACCESS_TOKEN_EXPIRE_MINUTES, Claims, TokenKeys};

use easy_emr_persistence::models::Role;
use thiserror::Error;

/// Errors raised while authenticating or authorizing a request.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token on the request.
    #[error("Not authenticated")]
    MissingToken,

    /// The token is malformed, badly signed or expired.
    #[error("Invalid credentials")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// The token names a user that does not exist.
    #[error("User not found")]
    UnknownUser,

    /// The user's role is not the one the route requires.
    #[error("role {actual} cannot access a route reserved for {required}")]
    RoleMismatch {
        /// Role the route requires.
        required: Role,
        /// Role carried by the token.
        actual: Role,
    },

    /// A password could not be hashed.
    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// A token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
