//! HTTP client for eSputnik API communication.
//!
//! This module provides the [`HttpClient`] type, the request executor every
//! generated operation delegates to.

use std::collections::HashMap;

use crate::auth::{basic_authorization, Credentials};
use crate::clients::errors::{HttpError, RemoteApiError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiVersion, EsputnikConfig, HostUrl, Password, Username};
use crate::operations::build_url;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the eSputnik API.
///
/// Every call performs exactly one HTTP round trip:
/// - the URL is `{host}/api/{version}/{path}` with `{{id}}` substituted
/// - `Authorization: Basic {token}` is always sent
/// - structured bodies are JSON-encoded with a JSON `Content-Type`
/// - statuses of 400 and above become [`HttpError::Response`]
///
/// There is no retry, pagination or caching.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; the credentials are only read after
/// construction, so concurrent calls need no locking.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    host: HostUrl,
    api_version: ApiVersion,
    credentials: Credentials,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &EsputnikConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}eSputnik API Library v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            host: config.host().clone(),
            api_version: config.api_version().clone(),
            credentials: Credentials::new(config.username().clone(), config.password().clone()),
            default_headers,
        })
    }

    /// Returns the configured host.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the account credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Replaces the account credentials, re-deriving the token.
    pub fn refresh_credentials(&mut self, username: Username, password: Password) {
        tracing::debug!("Refreshing credentials for {}", username.as_ref());
        self.credentials.refresh(username, password);
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL a request will be sent to.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let host = request.options.host.as_ref().unwrap_or(&self.host);
        build_url(
            host.as_ref(),
            &self.api_version,
            &request.path,
            request.options.id.as_deref(),
        )
    }

    /// Sends an HTTP request to the eSputnik API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The body cannot be encoded (`Serialization`)
    /// - Network error occurs (`Network`)
    /// - The status code is 400 or above (`Response`)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = HttpRequest::builder("account/info").build()?;
    /// let response = client.request(request).await?;
    /// println!("{}", response.body);
    /// ```
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request);
        let method = request.method();
        let token = request
            .options
            .token
            .as_deref()
            .unwrap_or_else(|| self.credentials.token());

        let mut req_builder = self.client.request(method.as_reqwest(), &url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.header("Authorization", basic_authorization(token));

        if let Some(body) = &request.body {
            if let Some(content_type) = body.content_type() {
                req_builder = req_builder.header("Content-Type", content_type);
            }
            req_builder = req_builder.body(body.encode()?);
        }

        tracing::debug!("Sending {} request to {}", method, url);

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let text = res.text().await?;

        if code >= 400 {
            let request_id = headers
                .get("x-request-id")
                .and_then(|values| values.first())
                .cloned();
            tracing::warn!(
                "eSputnik request {} {} failed with status {} (request id: {})",
                method,
                url,
                code,
                request_id.as_deref().unwrap_or("none")
            );
            return Err(RemoteApiError::from_body(code, &text, request_id).into());
        }

        Ok(HttpResponse::new(code, headers, &text))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
