//! Error types for the eSputnik API client.
//!
//! This module contains the configuration and validation errors raised before
//! any request leaves the process, plus [`EsputnikError`], the unified error
//! returned by the [`Esputnik`](crate::Esputnik) facade.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Request-level failures are grouped as follows:
//!
//! - [`ValidationError`]: the caller supplied a structurally invalid request
//! - [`HttpError`]: the HTTP exchange failed or the remote answered with a
//!   status of 400 or above
//! - [`EsputnikError::UnknownOperation`]: no operation is compiled under the
//!   requested dotted name
//!
//! # Example
//!
//! ```rust
//! use esputnik_api::{ConfigError, Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUsername)));
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide the eSputnik account login.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the eSputnik account password or API key.")]
    EmptyPassword,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected a non-empty path segment such as 'v1'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A custom-field identifier in a dictionary is not an integer.
    #[error("Invalid custom field id '{value}' for field '{field}'. Field ids must be integers.")]
    InvalidFieldId {
        /// The human-readable field name.
        field: String,
        /// The value that could not be read as an integer.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://esputnik.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Errors raised when a request is rejected before any network I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A bulk contact submission carried no contacts.
    #[error("contacts is required")]
    MissingContacts,
}

/// Unified error type returned by the [`Esputnik`](crate::Esputnik) facade.
///
/// # Example
///
/// ```rust,ignore
/// use esputnik_api::EsputnikError;
///
/// match client.call("account.info", None, RequestOptions::new()).await {
///     Ok(info) => println!("{info}"),
///     Err(EsputnikError::Http(e)) => println!("request failed: {e}"),
///     Err(e) => println!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum EsputnikError {
    /// The request was rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// No operation is registered under the given dotted name.
    #[error("Unknown operation '{name}'.")]
    UnknownOperation {
        /// The dotted name that was looked up.
        name: String,
    },

    /// A typed request could not be turned into a JSON body.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_username_error_message() {
        let message = ConfigError::EmptyUsername.to_string();
        assert!(message.contains("Username cannot be empty"));
    }

    #[test]
    fn test_invalid_field_id_error_message() {
        let error = ConfigError::InvalidFieldId {
            field: "plan".to_string(),
            value: "abc".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("plan"));
        assert!(message.contains("abc"));
        assert!(message.contains("must be integers"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "username" };
        let message = error.to_string();
        assert!(message.contains("username"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_missing_contacts_message_matches_remote_wording() {
        assert_eq!(ValidationError::MissingContacts.to_string(), "contacts is required");
    }

    #[test]
    fn test_esputnik_error_is_transparent_over_validation() {
        let error: EsputnikError = ValidationError::MissingContacts.into();
        assert_eq!(error.to_string(), "contacts is required");
    }

    #[test]
    fn test_error_implements_std_error() {
        let _: &dyn std::error::Error = &ConfigError::EmptyPassword;
        let _: &dyn std::error::Error = &ValidationError::MissingContacts;
    }
}
