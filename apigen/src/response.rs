//! Response envelope
//!
//! Every generated wrapper answers with the same two-field JSON shape:
//!
//! ```json
//! {"error": "", "response": {"id": 42}}
//! {"error": "login must not be empty"}
//! ```
//!
//! `error` is empty on success; `response` is omitted on error.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Content type of every envelope body.
pub const CONTENT_TYPE: &str = "application/json";

/// The fixed two-field response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Error text, empty on success
    pub error: String,
    /// Business result, omitted on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful envelope wrapping a result.
    pub fn ok(response: T) -> Self {
        Self {
            error: String::new(),
            response: Some(response),
        }
    }

    /// Returns true when the envelope carries no error.
    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }
}

impl Envelope<()> {
    /// Error envelope with no response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            response: None,
        }
    }
}

/// A rendered response: status plus JSON envelope body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: String,
}

impl Response {
    /// `200 OK` with the result wrapped in the envelope.
    ///
    /// A result that fails to serialize yields a `500` error envelope instead.
    pub fn success<T: Serialize + ?Sized>(result: &T) -> Self {
        match serde_json::to_string(&Envelope::ok(result)) {
            Ok(body) => Self {
                status: StatusCode::OK,
                body,
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to encode response");
                Self::error(&ApiError::from(err))
            }
        }
    }

    /// Error envelope with the error's status.
    pub fn error(err: &ApiError) -> Self {
        let body = serde_json::to_string(&Envelope::err(err.message.as_str()))
            .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string());
        Self {
            status: err.status,
            body,
        }
    }

    /// Status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// JSON body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decode the body back into an envelope.
    pub fn envelope<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<Envelope<T>> {
        serde_json::from_str(&self.body)
    }

    /// Split into status and body.
    pub fn into_parts(self) -> (StatusCode, String) {
        (self.status, self.body)
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        Self::error(&err)
    }
}
