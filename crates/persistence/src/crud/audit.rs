//! Audit log filtering.

use serde::{Deserialize, Serialize};

use crate::models::AuditLogEntry;

/// Independent, optional filters over audit entries.
///
/// - `path` and `method` match case-insensitive substrings.
/// - `status` must be all ASCII digits and then matches the status code
///   exactly. Any other value (including one too large for a status code)
///   matches nothing rather than being an error.
///
/// Empty filter strings are treated as absent.
///
/// ```
/// use easy_emr_persistence::crud::AuditFilter;
/// use easy_emr_persistence::models::AuditLogEntry;
///
/// let entry = AuditLogEntry {
///     path: "/Patient/p1".to_string(),
///     method: "GET".to_string(),
///     status_code: 404,
///     duration: 0.002,
/// };
///
/// assert!(AuditFilter::default().with_path("patient").matches(&entry));
/// assert!(AuditFilter::default().with_status("404").matches(&entry));
/// assert!(!AuditFilter::default().with_status("four").matches(&entry));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFilter {
    /// Case-insensitive substring of the request path.
    pub path: Option<String>,
    /// Case-insensitive substring of the HTTP method.
    pub method: Option<String>,
    /// Exact status code, as entered by the caller.
    pub status: Option<String>,
}

/// Parsed form of the status filter.
enum StatusFilter {
    Any,
    Exactly(u16),
    Nothing,
}

impl AuditFilter {
    /// Sets the path filter.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the method filter.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the status filter.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns true if `entry` satisfies every supplied filter.
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        let path_ok = active(&self.path).is_none_or(|needle| contains_ignore_case(&entry.path, needle));
        let method_ok =
            active(&self.method).is_none_or(|needle| contains_ignore_case(&entry.method, needle));
        let status_ok = match self.status_filter() {
            StatusFilter::Any => true,
            StatusFilter::Exactly(code) => entry.status_code == code,
            StatusFilter::Nothing => false,
        };
        path_ok && method_ok && status_ok
    }

    fn status_filter(&self) -> StatusFilter {
        match active(&self.status) {
            None => StatusFilter::Any,
            Some(raw) if raw.bytes().all(|b| b.is_ascii_digit()) => raw
                .parse()
                .map_or(StatusFilter::Nothing, StatusFilter::Exactly),
            Some(_) => StatusFilter::Nothing,
        }
    }
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|value| !value.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
