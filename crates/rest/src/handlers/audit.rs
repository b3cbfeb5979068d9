//! Audit log retrieval.

use axum::{Json, extract::State};
use easy_emr_persistence::core::DocumentStore;
use easy_emr_persistence::models::AuditLogEntry;
use serde::Serialize;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::AuditQuery;
use crate::state::AppState;

/// Body of `GET /audit`.
#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    /// Number of entries matching the filters, across all pages.
    pub total: usize,
    /// Entries on the requested page, newest first.
    pub logs: Vec<AuditLogEntry>,
}

/// Handler for audit log retrieval.
///
/// # HTTP Request
///
/// `GET /audit?search_path=&search_method=&search_status=&page=&limit=`
///
/// # Response
///
/// - `200 OK` - `{"total": n, "logs": [...]}`
/// - `400 Bad Request` - `page` or `limit` out of range
pub async fn audit_logs_handler<S>(
    State(state): State<AppState<S>>,
    query: AuditQuery,
) -> RestResult<Json<AuditLogPage>>
where
    S: DocumentStore + 'static,
{
    debug!(
        page = query.page.page(),
        limit = query.page.limit(),
        "Processing audit log request"
    );

    let page = state
        .repository()
        .list_audit_logs(&query.filter, query.page)
        .await?;

    Ok(Json(AuditLogPage {
        total: page.total,
        logs: page.items,
    }))
}
