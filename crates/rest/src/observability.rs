//! Metrics and error reporting.
//!
//! Both are process-global, so they are installed once by the binary and
//! never by [`create_app`](crate::create_app). Tests build apps freely
//! without touching either.

use metrics::{Unit, describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

// See https://prometheus.io/docs/practices/naming/
/// Requests served, labelled by method, route and status.
pub const HTTP_REQUESTS_TOTAL: &str = "emr_http_requests_total";

/// Request latency, labelled by method and route.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "emr_http_request_duration_seconds";

/// Audit entries that could not be written.
pub const AUDIT_WRITE_ERRORS_TOTAL: &str = "emr_audit_write_errors_total";

/// Installs the global Prometheus recorder and returns the handle that
/// renders it.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(HTTP_REQUESTS_TOTAL, "Number of HTTP requests served");
    describe_histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        Unit::Seconds,
        "Duration of HTTP requests"
    );
    describe_counter!(
        AUDIT_WRITE_ERRORS_TOTAL,
        "Number of audit log entries that failed to persist"
    );

    info!("Prometheus recorder installed");
    Ok(handle)
}

/// Initializes Sentry when a DSN is configured.
///
/// The returned guard flushes pending events when dropped and must be held
/// for the life of the process.
pub fn init_sentry(
    dsn: Option<&str>,
) -> Result<Option<sentry::ClientInitGuard>, sentry::types::ParseDsnError> {
    let Some(dsn) = dsn.filter(|dsn| !dsn.trim().is_empty()) else {
        return Ok(None);
    };

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(dsn.parse()?),
        release: sentry::release_name!(),
        traces_sample_rate: 1.0,
        ..Default::default()
    });
    Ok(Some(guard))
}
