//! Audit log query extractor.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use easy_emr_persistence::crud::AuditFilter;
use easy_emr_persistence::types::{DEFAULT_LIMIT, DEFAULT_PAGE, Page};
use serde::Deserialize;

use crate::error::RestError;

/// Axum extractor for `GET /audit` query parameters.
///
/// Accepts `search_path`, `search_method`, `search_status`, `page` and
/// `limit`. Filters are passed through untouched; `page` and `limit` are
/// range-checked here so an out-of-range value is a 400.
#[derive(Debug, Clone)]
pub struct AuditQuery {
    /// Filters to apply.
    pub filter: AuditFilter,
    /// Page to return.
    pub page: Page,
}

/// Raw query parameters.
#[derive(Debug, Deserialize)]
struct AuditQueryParams {
    search_path: Option<String>,
    search_method: Option<String>,
    search_status: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
}

impl AuditQueryParams {
    fn into_query(self) -> Result<AuditQuery, RestError> {
        let page = to_usize(self.page.unwrap_or(DEFAULT_PAGE as i64));
        let limit = to_usize(self.limit.unwrap_or(DEFAULT_LIMIT as i64));
        let page = Page::new(page, limit).map_err(|e| RestError::bad_request(e.to_string()))?;

        Ok(AuditQuery {
            filter: AuditFilter {
                path: self.search_path,
                method: self.search_method,
                status: self.search_status,
            },
            page,
        })
    }
}

// Negative values fold to 0, which `Page::new` rejects.
fn to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

impl<S> FromRequestParts<S> for AuditQuery
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<AuditQueryParams>::from_request_parts(parts, state).await?;
        params.into_query()
    }
}
