//! Password hashing.

use std::sync::OnceLock;

use super::AuthError;

/// Lowest bcrypt cost accepted by configuration.
pub const MIN_HASH_COST: u32 = 4;

/// Highest bcrypt cost accepted by configuration.
pub const MAX_HASH_COST: u32 = 31;

/// Hashes `plain` with bcrypt at the given work factor.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(plain, cost)?)
}

/// Checks `plain` against a stored bcrypt hash.
///
/// A malformed hash counts as a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match bcrypt::verify(plain, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be checked");
            false
        }
    }
}

const DECOY_PASSWORD: &str = "easy-emr-decoy-password";

/// A bcrypt hash checked when a login names an unknown user or an account
/// without a password, so every failed login does the same bcrypt work.
///
/// The hash is computed on first use at the configured cost.
#[derive(Debug)]
pub struct DecoyHash {
    cost: u32,
    hash: OnceLock<Option<String>>,
}

impl DecoyHash {
    /// Creates a decoy hashed at `cost`.
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            hash: OnceLock::new(),
        }
    }

    /// Verifies `plain` against the decoy. Always false.
    pub fn verify(&self, plain: &str) -> bool {
        let hash = self
            .hash
            .get_or_init(|| hash_password(DECOY_PASSWORD, self.cost).ok());
        if let Some(hash) = hash {
            let _ = bcrypt::verify(plain, hash);
        }
        false
    }

    /// Returns true once the decoy hash has been computed.
    pub fn is_primed(&self) -> bool {
        matches!(self.hash.get(), Some(Some(_)))
    }
}
