//! HTTP response types for the eSputnik API client.
//!
//! This module provides the [`HttpResponse`] type. eSputnik endpoints do not
//! always answer with JSON, so successful bodies are decoded leniently: valid
//! JSON is parsed, anything else is wrapped as `{"result": "<raw text>"}`.

use std::collections::HashMap;

use serde_json::Value;

/// Key of the wrapper object used for bodies that are not valid JSON.
pub const RAW_RESULT_KEY: &str = "result";

/// Decodes a successful response body.
///
/// # Example
///
/// ```rust
/// use esputnik_api::clients::decode_body;
/// use serde_json::json;
///
/// assert_eq!(decode_body(r#"{"id": 1}"#), json!({"id": 1}));
/// assert_eq!(decode_body("OK"), json!({"result": "OK"}));
/// ```
#[must_use]
pub fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| {
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(RAW_RESULT_KEY.to_string(), Value::String(text.to_string()));
        Value::Object(wrapper)
    })
}

/// A successful response from the eSputnik API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, decoding the raw body text.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, text: &str) -> Self {
        Self {
            code,
            headers,
            body: decode_body(text),
        }
    }

    /// Returns `true` if the status code is below 400.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code < 400
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Consumes the response, returning its decoded body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }
}
