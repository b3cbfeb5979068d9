//! Field-equality queries over stored documents.
//!
//! A [`Query`] is a conjunction of conditions of the form `field == value`.
//! Field names may be dotted paths into nested objects
//! (`soap_notes.plan`). A query with no conditions matches every document.

use serde_json::Value;

/// A conjunction of field-equality conditions.
///
/// # Example
///
/// ```
/// use easy_emr_persistence::core::Query;
/// use serde_json::json;
///
/// let query = Query::field("id").eq("p1").and(Query::field("gender").eq("M"));
///
/// assert!(query.matches(&json!({"id": "p1", "gender": "M"})));
/// assert!(!query.matches(&json!({"id": "p1", "gender": "F"})));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    path: Vec<String>,
    value: Value,
}

/// A query under construction, naming the field to compare.
#[derive(Debug, Clone)]
pub struct FieldQuery {
    path: Vec<String>,
}

impl FieldQuery {
    /// Completes the condition: the field must equal `value`.
    pub fn eq(self, value: impl Into<Value>) -> Query {
        Query {
            conditions: vec![Condition {
                path: self.path,
                value: value.into(),
            }],
        }
    }
}

impl Query {
    /// A query matching every document.
    pub fn any() -> Self {
        Self::default()
    }

    /// Starts a condition on `name`, which may be a dotted path.
    pub fn field(name: &str) -> FieldQuery {
        FieldQuery {
            path: name.split('.').map(String::from).collect(),
        }
    }

    /// Returns a query requiring both `self` and `other` to match.
    pub fn and(mut self, other: Query) -> Self {
        self.conditions.extend(other.conditions);
        self
    }

    /// Returns true if `document` satisfies every condition.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|condition| {
            lookup(document, &condition.path).is_some_and(|found| *found == condition.value)
        })
    }
}

fn lookup<'a>(document: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter()
        .try_fold(document, |current, segment| current.as_object()?.get(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(Query::any().matches(&json!({})));
        assert!(Query::any().matches(&json!({"id": "x"})));
    }

    #[test]
    fn test_missing_field_does_not_match() {
        let query = Query::field("id").eq("p1");
        assert!(!query.matches(&json!({"name": "p1"})));
    }

    #[test]
    fn test_type_sensitive_comparison() {
        let query = Query::field("status_code").eq(200);
        assert!(query.matches(&json!({"status_code": 200})));
        assert!(!query.matches(&json!({"status_code": "200"})));
    }

    #[test]
    fn test_dotted_path() {
        let query = Query::field("soap_notes.plan").eq("rest");
        assert!(query.matches(&json!({"soap_notes": {"plan": "rest"}})));
        assert!(!query.matches(&json!({"soap_notes": "rest"})));
    }

    #[test]
    fn test_and_requires_all() {
        let query = Query::field("a").eq(1).and(Query::field("b").eq(2));
        assert!(query.matches(&json!({"a": 1, "b": 2})));
        assert!(!query.matches(&json!({"a": 1, "b": 3})));
    }
}
