//! Access tokens.
//!
//! Tokens are HS256 JWTs carrying the username (`sub`) and role. They are
//! valid for [`ACCESS_TOKEN_EXPIRE_MINUTES`] after issue and cannot be
//! revoked.

use std::fmt;

use chrono::Utc;
use easy_emr_persistence::models::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the token holder.
    pub sub: String,
    /// Role of the token holder at issue time.
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    /// Builds claims for `username` issued now.
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        let iat = Utc::now().timestamp();
        Self {
            sub: username.into(),
            role,
            iat,
            exp: iat + ACCESS_TOKEN_EXPIRE_MINUTES * 60,
        }
    }
}

/// Signing and verification keys derived from the configured secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Derives HS256 keys from `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issues a token for `username` with `role`.
    pub fn create_access_token(&self, username: &str, role: Role) -> Result<String, AuthError> {
        self.sign(&Claims::new(username, role))
    }

    /// Signs arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(AuthError::Signing)
    }

    /// Verifies the signature and expiry of `token` and returns its claims.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let keys = TokenKeys::new("secret");
        let token = keys.create_access_token("alice", Role::Physician).unwrap();

        let claims = keys.decode_access_token(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, Role::Physician);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenKeys::new("one")
            .create_access_token("alice", Role::Admin)
            .unwrap();
        assert!(matches!(
            TokenKeys::new("two").decode_access_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = TokenKeys::new("secret");
        let now = Utc::now().timestamp();
        let token = keys
            .sign(&Claims {
                sub: "alice".to_string(),
                role: Role::Staff,
                iat: now - 3 * 3600,
                exp: now - 2 * 3600,
            })
            .unwrap();

        assert!(matches!(
            keys.decode_access_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let keys = TokenKeys::new("secret");
        assert!(keys.decode_access_token("not.a.jwt").is_err());
        assert!(keys.decode_access_token("").is_err());
    }
}
