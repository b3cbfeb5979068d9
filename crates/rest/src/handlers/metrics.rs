//! Prometheus exposition endpoint.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use easy_emr_persistence::core::DocumentStore;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Handler for `GET /metrics`.
///
/// # Response
///
/// - `200 OK` - Prometheus text exposition
/// - `404 Not Found` - No recorder is installed
pub async fn metrics_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: DocumentStore + 'static,
{
    let handle = state.metrics().ok_or(RestError::NotFound {
        resource_type: "Metrics",
    })?;

    Ok((
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        handle.render(),
    )
        .into_response())
}
