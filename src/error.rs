//! Error types for the gateway
//!
//! `StoreError` is what the store adapter returns, `ApiError` is what
//! handlers return and how it is rendered to the caller.

use std::fmt;

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Errors raised by a store operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key holds a structure the command cannot operate on
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    /// The store could not be reached or the connection broke
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other error reply, message kept as the store phrased it
    #[error("{0}")]
    Command(String),
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Key Kind ==
/// Structure a route expects to find under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    String,
    List,
    Set,
    Hash,
    SortedSet,
}

impl KeyKind {
    /// Capitalized label used at the start of a message.
    pub fn title(self) -> &'static str {
        match self {
            KeyKind::String => "String",
            KeyKind::List => "List",
            KeyKind::Set => "Set",
            KeyKind::Hash => "Hash",
            KeyKind::SortedSet => "Sorted set",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::String => "string",
            KeyKind::List => "list",
            KeyKind::Set => "set",
            KeyKind::Hash => "hash",
            KeyKind::SortedSet => "sorted set",
        };
        f.write_str(name)
    }
}

// == Api Error Enum ==
/// Error type returned by every HTTP handler.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Scalar key does not exist
    #[error("Key '{0}' not found")]
    NotFound(String),

    /// Collection is empty or missing
    #[error("{} {key} is empty or does not exist", .kind.title())]
    Empty { kind: KeyKind, key: String },

    /// Key exists with a different structure
    #[error("Key '{key}' exists but is not a {kind}")]
    WrongType { kind: KeyKind, key: String },

    /// Path parameters could not be coerced
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No route matched the request path
    #[error("Route {0} not found")]
    RouteNotFound(String),

    /// Any other store failure, surfaced verbatim
    #[error(transparent)]
    Store(StoreError),
}

impl ApiError {
    /// Attaches key context to a store error.
    ///
    /// The wrong-type condition becomes a client error naming the key and
    /// the expected structure; everything else stays a store failure.
    pub fn from_store(err: StoreError, key: &str, kind: KeyKind) -> Self {
        match err {
            StoreError::WrongType => ApiError::WrongType {
                kind,
                key: key.to_string(),
            },
            other => ApiError::Store(other),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::Empty { .. } | ApiError::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::WrongType { .. } | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the `status` field in the response body.
    pub fn status_label(&self) -> &'static str {
        match self {
            ApiError::Empty { .. } => "empty",
            _ => "error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", message);
        } else {
            warn!(status = status.as_u16(), "{}", message);
        }

        let body = Json(ErrorResponse::new(self.status_label(), message));
        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
