//! HTTP-specific error types for the eSputnik API client.
//!
//! # Error Handling
//!
//! - [`RemoteApiError`]: The remote answered with a status of 400 or above
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! No variant is ever retried by the client; a failed round trip surfaces
//! immediately.
//!
//! # Example
//!
//! ```rust,ignore
//! use esputnik_api::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Error returned when the remote API answers with a failure status.
///
/// The message is `"{code}: {message}"` when the response body is a JSON
/// object carrying `message` and either `error` or `error_code`; otherwise it
/// is the raw response text.
///
/// # Example
///
/// ```rust
/// use esputnik_api::clients::RemoteApiError;
///
/// let error = RemoteApiError::from_body(404, r#"{"error":"not_found","message":"no such contact"}"#, None);
/// assert_eq!(error.to_string(), "not_found: no such contact");
///
/// let error = RemoteApiError::from_body(500, "Internal error", None);
/// assert_eq!(error.to_string(), "Internal error");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteApiError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The interpreted error message.
    pub message: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

impl RemoteApiError {
    /// Builds the error from a failed response's raw body.
    #[must_use]
    pub fn from_body(code: u16, body: &str, error_reference: Option<String>) -> Self {
        Self {
            code,
            message: interpret_error_body(body),
            error_reference,
        }
    }
}

/// Interprets a failure body as `{error|error_code, message}`.
fn interpret_error_body(body: &str) -> String {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    let code = ["error", "error_code"]
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !is_blank(value));

    match (code, fields.get("message")) {
        (Some(code), Some(message)) => format!("{}: {}", render(code), render(message)),
        _ => body.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The endpoint path is empty.
    #[error("Cannot send a request without an endpoint path.")]
    EmptyPath,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The remote answered with a failure status.
    #[error(transparent)]
    Response(#[from] RemoteApiError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A structured body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
