//! Configuration types for the eSputnik API client.
//!
//! This module provides the configuration supplied to the client when it is
//! activated.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EsputnikConfig`]: The main configuration struct holding all client settings
//! - [`EsputnikConfigBuilder`]: A builder for constructing [`EsputnikConfig`] instances
//! - [`EsputnikSettings`]: The raw shape delivered by an external configuration store
//! - [`Username`], [`Password`]: Validated account credentials
//! - [`HostUrl`]: A validated API host
//! - [`ApiVersion`]: The API version path segment
//! - [`FieldDictionary`], [`Dictionaries`]: Custom-field name to id mappings
//!
//! # Example
//!
//! ```rust
//! use esputnik_api::{EsputnikConfig, Username, Password, ApiVersion};
//!
//! let config = EsputnikConfig::builder()
//!     .username(Username::new("user@example.com").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .api_version(ApiVersion::V1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.host().as_ref(), "https://esputnik.com");
//! ```

mod dictionary;
mod newtypes;
mod version;

pub use dictionary::{Dictionaries, FieldDictionary, DEFAULT_DICTIONARY};
pub use newtypes::{HostUrl, Password, Username};
pub use version::ApiVersion;

pub(crate) use dictionary::coerce_field_id;

use serde::Deserialize;

use crate::error::ConfigError;

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "https://esputnik.com";

/// Configuration for the eSputnik API client.
///
/// # Thread Safety
///
/// `EsputnikConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct EsputnikConfig {
    username: Username,
    password: Password,
    host: HostUrl,
    api_version: ApiVersion,
    dictionaries: Dictionaries,
    user_agent_prefix: Option<String>,
}

impl EsputnikConfig {
    /// Creates a new builder for constructing an `EsputnikConfig`.
    #[must_use]
    pub fn builder() -> EsputnikConfigBuilder {
        EsputnikConfigBuilder::new()
    }

    /// Returns the account login.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the account password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the configured field dictionaries.
    #[must_use]
    pub const fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify EsputnikConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EsputnikConfig>();
};

/// Settings as delivered by an external configuration store.
///
/// Every field is optional so that a partially populated store can be merged
/// with values set directly on the builder.
///
/// # Example
///
/// ```rust
/// use esputnik_api::EsputnikSettings;
///
/// let settings: EsputnikSettings = serde_json::from_str(r#"{
///     "username": "user@example.com",
///     "password": "secret",
///     "version": "v1",
///     "dictionaries": { "default": { "plan": "42" } }
/// }"#).unwrap();
///
/// assert!(settings.host.is_none());
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EsputnikSettings {
    /// Account login.
    pub username: Option<Username>,
    /// Account password or API key.
    pub password: Option<Password>,
    /// API host; [`DEFAULT_HOST`] when absent.
    pub host: Option<HostUrl>,
    /// API version segment.
    pub version: Option<ApiVersion>,
    /// Named field dictionaries.
    pub dictionaries: Option<Dictionaries>,
}

/// Builder for constructing [`EsputnikConfig`] instances.
///
/// Required fields are `username` and `password`.
///
/// # Defaults
///
/// - `host`: [`DEFAULT_HOST`]
/// - `api_version`: [`ApiVersion::V1`]
/// - `dictionaries`: Empty
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct EsputnikConfigBuilder {
    username: Option<Username>,
    password: Option<Password>,
    host: Option<HostUrl>,
    api_version: Option<ApiVersion>,
    dictionaries: Option<Dictionaries>,
    user_agent_prefix: Option<String>,
}

impl EsputnikConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account login (required).
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the account password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the field dictionaries.
    #[must_use]
    pub fn dictionaries(mut self, dictionaries: Dictionaries) -> Self {
        self.dictionaries = Some(dictionaries);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Merges settings from an external configuration store.
    ///
    /// Values already set on the builder take precedence over the store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use esputnik_api::{EsputnikConfig, EsputnikSettings, Username};
    ///
    /// let settings: EsputnikSettings = serde_json::from_str(
    ///     r#"{"username": "stored", "password": "secret"}"#,
    /// ).unwrap();
    ///
    /// let config = EsputnikConfig::builder()
    ///     .username(Username::new("explicit").unwrap())
    ///     .settings(settings)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(config.username().as_ref(), "explicit");
    /// ```
    #[must_use]
    pub fn settings(mut self, settings: EsputnikSettings) -> Self {
        self.username = self.username.or(settings.username);
        self.password = self.password.or(settings.password);
        self.host = self.host.or(settings.host);
        self.api_version = self.api_version.or(settings.version);
        self.dictionaries = self.dictionaries.or(settings.dictionaries);
        self
    }

    /// Builds the [`EsputnikConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `username` or
    /// `password` are not set.
    pub fn build(self) -> Result<EsputnikConfig, ConfigError> {
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;

        let host = match self.host {
            Some(host) => host,
            None => HostUrl::new(DEFAULT_HOST)?,
        };

        Ok(EsputnikConfig {
            username,
            password,
            host,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            dictionaries: self.dictionaries.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> EsputnikConfigBuilder {
        EsputnikConfig::builder()
            .username(Username::new("user").unwrap())
            .password(Password::new("secret").unwrap())
    }

    #[test]
    fn test_builder_requires_username() {
        let result = EsputnikConfigBuilder::new()
            .password(Password::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "username" })
        ));
    }

    #[test]
    fn test_builder_requires_password() {
        let result = EsputnikConfigBuilder::new()
            .username(Username::new("user").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "password" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = credentials().build().unwrap();

        assert_eq!(config.host().as_ref(), DEFAULT_HOST);
        assert_eq!(config.api_version(), &ApiVersion::V1);
        assert!(config.dictionaries().default_dictionary().is_empty());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_settings_fill_unset_fields_only() {
        let settings: EsputnikSettings = serde_json::from_str(
            r#"{
                "username": "stored-user",
                "password": "stored-secret",
                "host": "https://stored.example.com",
                "version": "v2",
                "dictionaries": {"default": {"plan": "9"}}
            }"#,
        )
        .unwrap();

        let config = EsputnikConfig::builder()
            .host(HostUrl::new("https://explicit.example.com").unwrap())
            .settings(settings)
            .build()
            .unwrap();

        assert_eq!(config.username().as_ref(), "stored-user");
        assert_eq!(config.password().as_ref(), "stored-secret");
        assert_eq!(config.host().as_ref(), "https://explicit.example.com");
        assert_eq!(config.api_version(), &ApiVersion::Custom("v2".to_string()));
        assert_eq!(config.dictionaries().default_dictionary().get("plan"), Some(9));
    }

    #[test]
    fn test_settings_reject_invalid_values() {
        let result = serde_json::from_str::<EsputnikSettings>(
            r#"{"username": "u", "password": "p", "dictionaries": {"default": {"plan": "free"}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_debug_masks_password() {
        let config = credentials().build().unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("EsputnikConfig"));
        assert!(!debug_str.contains("secret"));
    }
}
