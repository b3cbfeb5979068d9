//! Error types for the EMR REST API.
//!
//! Every handler and extractor returns [`RestError`], and this module is the
//! one place where errors become HTTP responses. The body is always
//! `{"detail": "<message>"}`.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Detail |
//! |-------|-------------|--------|
//! | BadRequest | 400 | the message |
//! | Unauthorized | 401 | the message (plus `WWW-Authenticate: Bearer`) |
//! | Forbidden | 403 | "Not authorized" |
//! | NotFound | 404 | "<Type> not found" |
//! | InternalError | 500 | "Internal Server Error" |
//!
//! Storage errors from the persistence layer map to 400 when the caller's
//! record failed validation and to 500 otherwise.

use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use easy_emr_persistence::error::StorageError;
use std::fmt;
use tracing::error;

use crate::auth::AuthError;

/// Detail returned for every role mismatch.
pub const NOT_AUTHORIZED: &str = "Not authorized";

/// Detail returned for every internal failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Malformed or invalid input (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Missing or unusable credentials (HTTP 401).
    Unauthorized {
        /// Error message.
        message: String,
    },

    /// Authenticated but lacking the required role (HTTP 403).
    Forbidden,

    /// Record not found (HTTP 404).
    NotFound {
        /// The record type (e.g., "Patient").
        resource_type: &'static str,
    },

    /// Internal server error (HTTP 500).
    ///
    /// The message is logged, never sent to the client.
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Shorthand for [`RestError::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Shorthand for [`RestError::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        RestError::Unauthorized {
            message: message.into(),
        }
    }

    /// Shorthand for [`RestError::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        RestError::InternalError {
            message: message.into(),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RestError::Forbidden => StatusCode::FORBIDDEN,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message placed in the response body.
    pub fn detail(&self) -> String {
        match self {
            RestError::BadRequest { message } | RestError::Unauthorized { message } => {
                message.clone()
            }
            RestError::Forbidden => NOT_AUTHORIZED.to_string(),
            RestError::NotFound { resource_type } => format!("{resource_type} not found"),
            RestError::InternalError { .. } => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            RestError::Forbidden => write!(f, "Forbidden: {}", NOT_AUTHORIZED),
            RestError::NotFound { resource_type } => write!(f, "{} not found", resource_type),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::InternalError { message } = &self {
            error!(error = %message, "Request failed with an internal error");
        }

        let status = self.status_code();
        let body = Json(serde_json::json!({ "detail": self.detail() }));
        let mut response = (status, body).into_response();

        if matches!(self, RestError::Unauthorized { .. }) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => RestError::bad_request(e.to_string()),
            other => RestError::internal(other.to_string()),
        }
    }
}

impl From<AuthError> for RestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken(_) | AuthError::UnknownUser => {
                RestError::unauthorized(err.to_string())
            }
            AuthError::RoleMismatch { .. } => RestError::Forbidden,
            AuthError::Hashing(_) | AuthError::Signing(_) => RestError::internal(err.to_string()),
        }
    }
}

// Extractor rejections are client errors.

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for RestError {
    fn from(rejection: QueryRejection) -> Self {
        RestError::bad_request(rejection.body_text())
    }
}

impl From<FormRejection> for RestError {
    fn from(rejection: FormRejection) -> Self {
        RestError::bad_request(rejection.body_text())
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
