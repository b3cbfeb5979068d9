//! JSON body extractors.
//!
//! Wraps axum's `Json` so malformed bodies come back as the usual
//! `{"detail": ...}` 400 instead of axum's plain-text rejection.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use easy_emr_persistence::models::Record;
use serde::de::DeserializeOwned;

use crate::error::RestError;

/// Axum extractor for an arbitrary JSON payload.
///
/// # Example
///
/// ```rust,ignore
/// async fn signup(JsonBody(payload): JsonBody<SignupRequest>) { ... }
/// ```
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

/// Axum extractor for a typed record.
///
/// Deserializes the body and runs the record's own validation, so handlers
/// receive only records that [`Repository::add`] will accept.
///
/// [`Repository::add`]: easy_emr_persistence::crud::Repository::add
#[derive(Debug)]
pub struct RecordBody<T>(pub T);

impl<S, T> FromRequest<S> for RecordBody<T>
where
    S: Send + Sync,
    T: Record,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(record) = JsonBody::<T>::from_request(req, state).await?;
        record
            .validate()
            .map_err(|e| RestError::bad_request(e.to_string()))?;
        Ok(RecordBody(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use easy_emr_persistence::models::Patient;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/Patient")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_record() {
        let req = json_request(
            r#"{"id":"p1","first_name":"John","last_name":"Doe","dob":"1990-01-01","gender":"M"}"#,
        );
        let RecordBody(patient) = RecordBody::<Patient>::from_request(req, &()).await.unwrap();
        assert_eq!(patient.id, "p1");
    }

    #[tokio::test]
    async fn test_bad_date_is_bad_request() {
        let req = json_request(
            r#"{"id":"p1","first_name":"John","last_name":"Doe","dob":"01/01/1990","gender":"M"}"#,
        );
        let err = RecordBody::<Patient>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_validation_is_bad_request() {
        let req = json_request(
            r#"{"id":"","first_name":"John","last_name":"Doe","dob":"1990-01-01","gender":"M"}"#,
        );
        let err = RecordBody::<Patient>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.detail().contains("id"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/Patient")
            .body(Body::from("{}"))
            .unwrap();
        let err = JsonBody::<serde_json::Value>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
