//! Account credentials and the derived Basic auth token.
//!
//! This module provides the [`Credentials`] type holding the login, the
//! password and the token every request is authorized with.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::{Password, Username};

/// Derives the Basic auth token for a login/password pair.
///
/// The token is the base64 encoding of `username:password`.
///
/// # Example
///
/// ```rust
/// use esputnik_api::auth::derive_token;
/// use esputnik_api::{Password, Username};
///
/// let token = derive_token(
///     &Username::new("user").unwrap(),
///     &Password::new("pass").unwrap(),
/// );
/// assert_eq!(token, "dXNlcjpwYXNz");
/// ```
#[must_use]
pub fn derive_token(username: &Username, password: &Password) -> String {
    STANDARD.encode(format!("{}:{}", username.as_ref(), password.as_ref()))
}

/// Credentials for an eSputnik account.
///
/// The token is derived on construction and re-derived by
/// [`refresh`](Self::refresh); it is never set independently of the login
/// and password it came from.
///
/// # Thread Safety
///
/// `Credentials` is `Send + Sync`. A client only reads it after activation.
///
/// # Example
///
/// ```rust
/// use esputnik_api::auth::Credentials;
/// use esputnik_api::{Password, Username};
///
/// let credentials = Credentials::new(
///     Username::new("user").unwrap(),
///     Password::new("pass").unwrap(),
/// );
/// assert_eq!(credentials.authorization_header(), "Basic dXNlcjpwYXNz");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Password,
    token: String,
}

impl Credentials {
    /// Creates credentials and derives their token.
    #[must_use]
    pub fn new(username: Username, password: Password) -> Self {
        let token = derive_token(&username, &password);
        Self {
            username,
            password,
            token,
        }
    }

    /// Replaces the login and password and re-derives the token.
    pub fn refresh(&mut self, username: Username, password: Password) {
        *self = Self::new(username, password);
    }

    /// Returns the account login.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the derived token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the `Authorization` header value for this account.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        basic_authorization(&self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password)
            .field("token", &"*****")
            .finish()
    }
}

/// Formats a token as a Basic `Authorization` header value.
pub(crate) fn basic_authorization(token: &str) -> String {
    format!("Basic {token}")
}

// Verify Credentials is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credentials>();
};
