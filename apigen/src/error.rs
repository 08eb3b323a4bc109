//! Error types for generated handlers
//!
//! Every failure a generated wrapper can observe ends up as an [`ApiError`]:
//! a status code plus a human-readable message. Field-level failures raised by
//! generated validation routines are described by [`ValidationError`] and
//! convert into a `400 Bad Request` [`ApiError`].
//!
//! # Status mapping
//!
//! | Failure | Status |
//! |---------|--------|
//! | Validation failure | 400 Bad Request |
//! | Auth failure | 403 Forbidden |
//! | Unmatched path | 404 Not Found |
//! | Wrong HTTP method | 405 Method Not Allowed |
//! | Unclassified business error | 500 Internal Server Error |
//!
//! # Example
//! ```rust
//! use apigen::{ApiError, http::StatusCode};
//!
//! let error = ApiError::not_found("user not exist");
//! assert_eq!(error.status, StatusCode::NOT_FOUND);
//!
//! let error = ApiError::new(StatusCode::CONFLICT, "user exists");
//! assert!(error.is_client_error());
//! ```

use http::StatusCode;
use thiserror::Error;

/// Error carrying an HTTP status and the message placed in the envelope.
///
/// The message is never empty: constructing an error with an empty message
/// falls back to the canonical reason phrase of the status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Status code written to the response
    pub status: StatusCode,
    /// Text placed in the envelope's `error` field
    pub message: String,
}

impl ApiError {
    /// Create a new error with status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = status
                .canonical_reason()
                .unwrap_or("error")
                .to_ascii_lowercase();
        }
        Self { status, message }
    }

    /// Classify an error returned by a business method.
    ///
    /// An [`ApiError`] is forwarded unchanged and a [`ValidationError`] keeps its
    /// `400` mapping. Anything else becomes a `500 Internal Server Error`
    /// carrying the error's display text.
    pub fn from_business<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let err = err.into();
        let err = match err.downcast::<ApiError>() {
            Ok(api) => return *api,
            Err(other) => other,
        };
        match err.downcast::<ValidationError>() {
            Ok(validation) => (*validation).into(),
            Err(other) => Self::internal(other.to_string()),
        }
    }

    /// Returns true for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Returns true for 5xx statuses.
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    // Convenience constructors

    /// Create a 400 BAD_REQUEST error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a 403 FORBIDDEN error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Create a 404 NOT_FOUND error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create a 405 METHOD_NOT_ALLOWED error.
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    /// Create a 409 CONFLICT error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Create a 500 INTERNAL_SERVER_ERROR error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}

/// Field-level validation failure.
///
/// `field` is the request key the value was read from (the lower-cased field
/// name, or the `paramname` override).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The value was empty (text) or zero (integer) after all other rules ran.
    #[error("{field} must not be empty")]
    Required { field: &'static str },

    /// The value was present but is not a valid integer for the field.
    #[error("{field} must be int")]
    NotInteger { field: &'static str },

    /// The value is not one of the accepted alternatives.
    #[error("{field} must be one of [{}]", .allowed.join(", "))]
    NotOneOf {
        field: &'static str,
        allowed: &'static [&'static str],
    },

    /// Text shorter than the minimum length.
    #[error("{field} len must be >= {min}")]
    TooShort { field: &'static str, min: usize },

    /// Text longer than the maximum length.
    #[error("{field} len must be <= {max}")]
    TooLong { field: &'static str, max: usize },

    /// Integer below the minimum.
    #[error("{field} must be >= {min}")]
    BelowMin { field: &'static str, min: i64 },

    /// Integer above the maximum.
    #[error("{field} must be <= {max}")]
    AboveMax { field: &'static str, max: i64 },
}

impl ValidationError {
    /// The request key that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::NotInteger { field }
            | Self::NotOneOf { field, .. }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::BelowMin { field, .. }
            | Self::AboveMax { field, .. } => field,
        }
    }

    /// Short machine-readable name of the violated constraint.
    pub fn constraint(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::NotInteger { .. } => "int",
            Self::NotOneOf { .. } => "enum",
            Self::TooShort { .. } | Self::BelowMin { .. } => "min",
            Self::TooLong { .. } | Self::AboveMax { .. } => "max",
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!(
            field = err.field(),
            constraint = err.constraint(),
            "request rejected by validation"
        );
        Self::bad_request(err.to_string())
    }
}

/// Result type alias for handler operations.
pub type ApiResult<T> = Result<T, ApiError>;
