//! # easy-emr-rest - EMR HTTP API
//!
//! This crate provides the HTTP surface of the Easy EMR demo backend: patient
//! records, role-guarded clinical records, password login with bearer
//! tokens, and a request audit trail that is itself queryable.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use easy_emr_persistence::backends::memory::MemoryStore;
//! use easy_emr_rest::{ServerConfig, create_app_with_config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(MemoryStore::new(), config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Access |
//! |--------|------|--------|
//! | GET | `/`, `/health`, `/metrics` | public |
//! | POST, GET | `/Patient`, `/Patient/{id}` | public |
//! | GET | `/audit` | public |
//! | POST | `/token`, `/signup`, `/demo/create-user` | public |
//! | GET | `/users/me` | any user |
//! | GET | `/admin/users` | admin |
//! | POST, GET | `/appointments`, `/lab-orders`, `/lab-results` | any user |
//! | POST, GET | `/encounters`, `/prescriptions` | physician |
//! | POST, GET | `/billing` | staff |
//!
//! ## Error Handling
//!
//! Every error body is `{"detail": "<message>"}`; see [`error`] for the
//! status mapping.
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types and their HTTP mapping
//! - [`state`] - Application state (repository, configuration, token keys)
//! - [`auth`] - Passwords, tokens and role guards
//! - [`extractors`] - Request body and query extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request auditing
//! - [`observability`] - Metrics recorder and Sentry
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{LogFormat, ServerConfig};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::StatusCode};
use easy_emr_persistence::core::DocumentStore;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(store: S) -> Router
where
    S: DocumentStore + 'static,
{
    create_app_with_config(store, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Metrics are not rendered; use [`create_app_with_state`] with
/// [`AppState::with_metrics`] for that.
pub fn create_app_with_config<S>(store: S, config: ServerConfig) -> Router
where
    S: DocumentStore + 'static,
{
    create_app_with_state(AppState::new(Arc::new(store), config))
}

/// Creates the Axum application from prepared state.
///
/// Layers, innermost first: request timeout, audit, tracing, CORS. The audit
/// layer sits outside the timeout so timed-out requests are audited as 408.
pub fn create_app_with_state<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        state.store().backend_name()
    );

    let config = state.config().clone();
    let router = routing::create_routes(state.clone());

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::audit_middleware::<S>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config))
}

/// Builds the CORS layer: one allowed origin, any method and header.
///
/// The origin is echoed only to requests that carry it.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origin == "*" {
        return cors.allow_origin(Any);
    }

    match config.cors_origin.parse::<http::HeaderValue>() {
        Ok(origin) => cors.allow_origin(AllowOrigin::list([origin])),
        Err(_) => {
            tracing::warn!(origin = %config.cors_origin, "Ignoring invalid CORS origin");
            cors
        }
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`. When Sentry is initialized, `error!` events are
/// also reported there.
pub fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "easy_emr={level},easy_emr_rest={level},easy_emr_persistence={level},tower_http=info"
        ))
    });

    let fmt_layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Text => fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(sentry::integrations::tracing::layer())
        .with(filter)
        .init();
}
