//! HTTP client types for eSputnik API communication.
//!
//! This module provides the request executor layer: one authenticated HTTP
//! round trip per call, with lenient response decoding.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async request executor
//! - [`HttpRequest`]: A request envelope (path template, method, body, overrides)
//! - [`RequestBody`]: A structured (JSON) or pre-encoded text body
//! - [`RequestOptions`]: Per-call host, token and id overrides
//! - [`HttpResponse`]: A decoded successful response
//! - [`HttpError`], [`RemoteApiError`]: Failures
//!
//! # Response Decoding
//!
//! The body is always read as text first. Statuses of 400 and above fail
//! with [`RemoteApiError`]; any other status succeeds, with the text parsed as
//! JSON or, failing that, wrapped as `{"result": "<text>"}`.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, InvalidHttpRequestError, RemoteApiError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody, RequestOptions};
pub use http_response::{decode_body, HttpResponse, RAW_RESULT_KEY};
