//! Authentication types for the eSputnik API client.
//!
//! eSputnik authenticates every request with HTTP Basic auth built from the
//! account login and password.
//!
//! # Overview
//!
//! - [`Credentials`]: Login, password and the token derived from them
//! - [`derive_token`]: The pure token derivation
//!
//! Token management is external to the request layer: a failed request is
//! never retried with a refreshed token. Rotating credentials is an explicit
//! [`Credentials::refresh`] call.
//!
//! # Example
//!
//! ```rust
//! use esputnik_api::auth::Credentials;
//! use esputnik_api::{Password, Username};
//!
//! let credentials = Credentials::new(
//!     Username::new("user").unwrap(),
//!     Password::new("pass").unwrap(),
//! );
//! assert_eq!(credentials.token(), "dXNlcjpwYXNz");
//! ```

mod credentials;

pub use credentials::{derive_token, Credentials};

pub(crate) use credentials::basic_authorization;
