//! HTTP request types for the eSputnik API client.
//!
//! This module provides the [`HttpRequest`] envelope and its builder, the
//! [`RequestBody`] union and the per-call [`RequestOptions`] overrides.

use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;
use crate::config::HostUrl;

/// HTTP methods supported by the eSputnik API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method used when a request does not name one.
    ///
    /// Requests carrying a body default to POST, all others to GET.
    #[must_use]
    pub const fn default_for(has_body: bool) -> Self {
        if has_body {
            Self::Post
        } else {
            Self::Get
        }
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request body.
///
/// Structured bodies are serialized to JSON and sent with a JSON content
/// type; text bodies are sent as-is without a content type.
///
/// A JSON string value converts to [`RequestBody::Text`]:
///
/// ```rust
/// use esputnik_api::clients::RequestBody;
/// use serde_json::json;
///
/// assert!(matches!(RequestBody::from(json!({"a": 1})), RequestBody::Json(_)));
/// assert!(matches!(RequestBody::from(json!("raw")), RequestBody::Text(_)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A structured value to be JSON-encoded.
    Json(Value),
    /// A pre-encoded body sent verbatim.
    Text(String),
}

impl RequestBody {
    /// Content type sent with structured bodies.
    pub const JSON_CONTENT_TYPE: &'static str = "application/json; charset=UTF-8";

    /// Returns the `Content-Type` this body is sent with, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some(Self::JSON_CONTENT_TYPE),
            Self::Text(_) => None,
        }
    }

    /// Returns the encoded body.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if a structured body cannot be encoded.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Json(value) => serde_json::to_string(value),
            Self::Text(text) => Ok(text.clone()),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Json(other),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Per-call overrides forwarded verbatim to the request executor.
///
/// # Example
///
/// ```rust
/// use esputnik_api::clients::RequestOptions;
///
/// let options = RequestOptions::new().id(42).token("other-token");
/// assert_eq!(options.id.as_deref(), Some("42"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Host used instead of the configured one.
    pub host: Option<HostUrl>,
    /// Token used instead of the one derived from the credentials.
    pub token: Option<String>,
    /// Value substituted for the `{{id}}` placeholder.
    pub id: Option<String>,
}

impl RequestOptions {
    /// Creates options with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the host.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Overrides the auth token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the id substituted into the endpoint template.
    #[must_use]
    pub fn id(mut self, id: impl fmt::Display) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

/// A single request to the eSputnik API.
///
/// Use [`HttpRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use esputnik_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder("emails/unsubscribed/add")
///     .body(json!({"emails": ["a@example.com"]}))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.method(), HttpMethod::Post);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The endpoint template, relative to the versioned API root.
    pub path: String,
    /// The HTTP method; derived from the body when `None`.
    pub http_method: Option<HttpMethod>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Per-call overrides.
    pub options: RequestOptions,
}

impl HttpRequest {
    /// Creates a new builder for the given endpoint template.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Returns the method this request is sent with.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.http_method
            .unwrap_or_else(|| HttpMethod::default_for(self.body.is_some()))
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyPath`] if the path is empty.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim().is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    http_method: Option<HttpMethod>,
    body: Option<RequestBody>,
    options: RequestOptions,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            http_method: None,
            body: None,
            options: RequestOptions::default(),
        }
    }

    /// Sets the HTTP method explicitly.
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    /// Sets the HTTP method if one is given.
    #[must_use]
    pub fn method_opt(mut self, method: Option<HttpMethod>) -> Self {
        self.http_method = method.or(self.http_method);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body if one is given.
    #[must_use]
    pub fn body_opt(mut self, body: Option<RequestBody>) -> Self {
        self.body = body;
        self
    }

    /// Sets all per-call overrides at once.
    #[must_use]
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            path: self.path,
            http_method: self.http_method,
            body: self.body,
            options: self.options,
        };
        request.verify()?;
        Ok(request)
    }
}
