//! eSputnik API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the eSputnik REST API to address. The version is the path segment that
//! follows `/api/` in every request URL.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// eSputnik API version.
///
/// # Example
///
/// ```rust
/// use esputnik_api::ApiVersion;
///
/// let version: ApiVersion = "v1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1);
/// assert_eq!(version.to_string(), "v1");
///
/// let custom: ApiVersion = "v2".parse().unwrap();
/// assert_eq!(custom, ApiVersion::Custom("v2".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version `v1`.
    V1,
    /// Any other version segment.
    Custom(String),
}

impl ApiVersion {
    /// Returns the version used when none is configured.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::Custom(version) => f.write_str(version),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = s.trim();
        if version.is_empty() || version.contains('/') {
            return Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            });
        }

        match version {
            "v1" => Ok(Self::V1),
            other => Ok(Self::Custom(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
