//! Request audit middleware.
//!
//! Wraps every request: times it, records one [`AuditLogEntry`], logs one
//! `request` line and updates the HTTP metrics. All of it happens inside an
//! `http_request` span carrying the method and path.
//!
//! A failed audit write is logged and counted; the response the client sees
//! is never changed by it.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::AuditLogEntry;
use tracing::{Instrument, error, field, info, info_span};

use crate::observability::{
    AUDIT_WRITE_ERRORS_TOTAL, HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUESTS_TOTAL,
};
use crate::state::AppState;

/// Path served by the metrics handler; never audited or measured.
pub const METRICS_PATH: &str = "/metrics";

/// Middleware function for request auditing.
///
/// This can be used with `axum::middleware::from_fn_with_state`.
pub async fn audit_middleware<S>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Response
where
    S: DocumentStore + 'static,
{
    let path = request.uri().path().to_string();
    if path == METRICS_PATH {
        return next.run(request).await;
    }

    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let span = info_span!(
        "http_request",
        method = %method,
        path = %path,
        status = field::Empty
    );

    async move {
        let start = Instant::now();
        let response = next.run(request).await;
        let duration = start.elapsed().as_secs_f64();
        let status = response.status().as_u16();
        tracing::Span::current().record("status", status);

        let entry = AuditLogEntry {
            path: path.clone(),
            method: method.clone(),
            status_code: status,
            duration,
        };
        if let Err(e) = state.repository().add_audit_log(&entry).await {
            error!(error = %e, path = %path, "Failed to write audit log entry");
            metrics::counter!(AUDIT_WRITE_ERRORS_TOTAL).increment(1);
        }

        info!(path = %path, method = %method, status, duration, "request");

        metrics::counter!(
            HTTP_REQUESTS_TOTAL,
            "method" => method.clone(),
            "route" => route.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!(
            HTTP_REQUEST_DURATION_SECONDS,
            "method" => method,
            "route" => route
        )
        .record(duration);

        response
    }
    .instrument(span)
    .await
}
