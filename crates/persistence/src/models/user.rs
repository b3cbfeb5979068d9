//! User accounts and roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Identifiable, Record, require_non_blank};
use crate::core::Table;
use crate::error::ValidationError;

/// Role carried by a user and embedded in their access tokens.
///
/// Roles are flat: no role implies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System administrator.
    Admin,
    /// Clinician allowed to write encounters and prescriptions.
    Physician,
    /// Front-desk and billing staff.
    Staff,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Physician => "physician",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "physician" => Ok(Role::Physician),
            "staff" => Ok(Role::Staff),
            other => Err(ValidationError::invalid(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// A user account.
///
/// `password_hash` is absent for users created through the demo seeding
/// endpoint; such users exist for display purposes and cannot log in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Record identifier.
    pub id: String,
    /// Login name, unique across users.
    pub username: String,
    /// bcrypt hash of the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Role embedded in issued tokens.
    pub role: Role,
    /// Optional name for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl User {
    /// Returns the public view of this user, without the password hash.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            role: self.role,
            display_name: self.display_name.clone(),
        }
    }
}

impl Record for User {
    const TABLE: Table = Table::Users;
    const NAME: &'static str = "User";

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("username", &self.username)?;
        if self.username.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid(
                "username",
                "must not contain whitespace",
            ));
        }
        Ok(())
    }
}

impl Identifiable for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A user as shown to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}
