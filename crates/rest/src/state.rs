//! Application state for the EMR REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the record repository, configuration, token keys and the
//! optional metrics handle.

use std::sync::Arc;

use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::crud::Repository;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::auth::{DecoyHash, TokenKeys};
use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The document store backend (must implement [`DocumentStore`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use easy_emr_persistence::backends::memory::MemoryStore;
/// use easy_emr_rest::{AppState, ServerConfig};
///
/// let state = AppState::new(Arc::new(MemoryStore::new()), ServerConfig::for_testing());
/// assert!(state.metrics().is_none());
/// ```
pub struct AppState<S: DocumentStore> {
    /// Typed access to the document store.
    repository: Repository<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Access token keys.
    tokens: Arc<TokenKeys>,

    /// Hash checked on logins that have no stored hash.
    password_decoy: Arc<DecoyHash>,

    /// Prometheus render handle, when a recorder is installed.
    metrics: Option<PrometheusHandle>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S: DocumentStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            config: Arc::clone(&self.config),
            tokens: Arc::clone(&self.tokens),
            password_decoy: Arc::clone(&self.password_decoy),
            metrics: self.metrics.clone(),
        }
    }
}

impl<S: DocumentStore> AppState<S> {
    /// Creates a new AppState with the given store and configuration.
    pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret);
        let password_decoy = DecoyHash::new(config.password_hash_cost);
        Self {
            repository: Repository::new(store),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            password_decoy: Arc::new(password_decoy),
            metrics: None,
        }
    }

    /// Attaches the handle used to render `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Returns the record repository.
    pub fn repository(&self) -> &Repository<S> {
        &self.repository
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        self.repository.store()
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the access token keys.
    pub fn tokens(&self) -> &TokenKeys {
        &self.tokens
    }

    /// Returns the decoy hash used by failed logins.
    pub fn password_decoy(&self) -> &Arc<DecoyHash> {
        &self.password_decoy
    }

    /// Returns the metrics handle, if metrics are enabled.
    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easy_emr_persistence::backends::memory::MemoryStore;
    use easy_emr_persistence::models::Role;

    #[test]
    fn test_state_clone_shares_store() {
        let state = AppState::new(Arc::new(MemoryStore::new()), ServerConfig::for_testing());
        let cloned = state.clone();

        assert!(std::ptr::eq(state.store(), cloned.store()));
        assert_eq!(state.store().backend_name(), "memory");
    }

    #[test]
    fn test_tokens_use_configured_secret() {
        let state = AppState::new(Arc::new(MemoryStore::new()), ServerConfig::for_testing());
        let token = state
            .tokens()
            .create_access_token("alice", Role::Admin)
            .unwrap();

        let other = TokenKeys::new("test-secret");
        assert_eq!(other.decode_access_token(&token).unwrap().sub, "alice");
    }
}
