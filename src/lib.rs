//! # eSputnik API Rust client
//!
//! An async client for the eSputnik marketing API, with type-safe
//! configuration, a namespace of named operations, and contact
//! normalization for bulk updates.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`EsputnikConfig`] and [`EsputnikConfigBuilder`]
//! - Validated newtypes for credentials and the API host
//! - HTTP Basic authentication derived from the account login and password
//! - A namespace of operations compiled from a static table and addressed
//!   by dotted names such as `emails.unsubscribed.add`
//! - Lenient response decoding: non-JSON bodies come back as `{"result": "<text>"}`
//! - Bulk contact updates with custom fields addressed by name
//!
//! ## Quick Start
//!
//! ```rust
//! use esputnik_api::{EsputnikConfig, Username, Password, ApiVersion};
//!
//! let config = EsputnikConfig::builder()
//!     .username(Username::new("user@example.com").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Calling Operations
//!
//! ```rust,ignore
//! use esputnik_api::{Esputnik, RequestOptions};
//! use serde_json::json;
//!
//! let esputnik = Esputnik::new(config)?;
//!
//! // By dotted name
//! let info = esputnik.call("account.info", None, RequestOptions::new()).await?;
//!
//! // Through the namespace, with an id substituted into the path
//! let send = esputnik.api().resolve("message.id.send").unwrap();
//! send.call(Some(json!({"recipients": []}).into()), RequestOptions::new().id(42)).await?;
//! ```
//!
//! ## Configuration Store
//!
//! Settings kept in an external store deserialize into [`EsputnikSettings`]:
//!
//! ```rust
//! use esputnik_api::{EsputnikConfig, EsputnikSettings};
//!
//! let settings: EsputnikSettings = serde_json::from_str(r#"{
//!     "username": "user@example.com",
//!     "password": "secret",
//!     "dictionaries": {"default": {"plan": 101, "language": "102"}}
//! }"#).unwrap();
//!
//! let config = EsputnikConfig::builder().settings(settings).build().unwrap();
//! assert_eq!(config.dictionaries().default_dictionary().get("language"), Some(102));
//! ```
//!
//! ## Bulk Contact Updates
//!
//! ```rust,ignore
//! use esputnik_api::contacts::{Contact, ContactsBulkUpdate};
//! use serde_json::json;
//!
//! let contact: Contact = serde_json::from_value(json!({
//!     "email": "ann@example.com",
//!     "fields": {"plan": "free"}
//! }))?;
//!
//! // Sends contactFields ["email"] and customFieldIds [101]
//! esputnik.add_contacts(ContactsBulkUpdate::new(vec![contact])).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global mutable state**: configuration is instance-based; the
//!   compiled operation namespace is immutable
//! - **Fail-fast validation**: newtypes and dictionaries validate on construction
//! - **Thread-safe**: all client types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **One round trip per call**: no retries, pagination or caching

pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod contacts;
pub mod error;
pub mod operations;

// Re-export public types at crate root for convenience
pub use auth::{derive_token, Credentials};
pub use client::Esputnik;
pub use config::{
    ApiVersion, Dictionaries, EsputnikConfig, EsputnikConfigBuilder, EsputnikSettings,
    FieldDictionary, HostUrl, Password, Username,
};
pub use error::{ConfigError, EsputnikError, ValidationError};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, RemoteApiError, RequestBody, RequestOptions,
};

// Re-export operation and contact types
pub use contacts::{Contact, ContactsBulkUpdate, CustomField, CustomFields};
pub use operations::{Namespace, Operation, OperationDefinition, Scope, OPERATIONS};
