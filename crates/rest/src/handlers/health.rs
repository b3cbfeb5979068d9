//! Liveness endpoints.

use axum::{Json, extract::State};
use easy_emr_persistence::core::DocumentStore;
use serde_json::{Value, json};
use tracing::debug;

use crate::state::AppState;

/// Handler for the root endpoint.
///
/// # HTTP Request
///
/// `GET /`
///
/// # Response
///
/// - `200 OK` - `{"status": "ok"}`
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for the health check endpoint.
///
/// Returns the backend in use and the server time, useful for load
/// balancers and monitoring systems.
///
/// # HTTP Request
///
/// `GET /health`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Json<Value>
where
    S: DocumentStore + 'static,
{
    debug!("Processing health check request");

    Json(json!({
        "status": "healthy",
        "backend": state.store().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
