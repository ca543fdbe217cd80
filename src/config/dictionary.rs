//! Field dictionaries mapping human field names to custom-field ids.
//!
//! eSputnik identifies account-specific contact attributes by numeric ids.
//! A [`FieldDictionary`] lets callers address them by name instead; the
//! contact normalizer resolves names through the dictionary registered under
//! [`DEFAULT_DICTIONARY`].
//!
//! Ids may be supplied as JSON numbers or as numeric strings. They are
//! coerced to integers when the dictionary is built, so a bad id fails at
//! configuration time rather than mid-request.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ConfigError;

/// Name of the dictionary read by the contact normalizer.
pub const DEFAULT_DICTIONARY: &str = "default";

static EMPTY_DICTIONARY: FieldDictionary = FieldDictionary(BTreeMap::new());

/// Mapping from human-readable field name to numeric custom-field id.
///
/// # Example
///
/// ```rust
/// use esputnik_api::FieldDictionary;
///
/// let dictionary: FieldDictionary = serde_json::from_str(r#"{"plan": 12, "language": "34"}"#).unwrap();
/// assert_eq!(dictionary.get("plan"), Some(12));
/// assert_eq!(dictionary.get("language"), Some(34));
/// assert_eq!(dictionary.get("unknown"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldDictionary(BTreeMap<String, i64>);

impl FieldDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Registers a field name under the given id, replacing any previous id.
    pub fn insert(&mut self, name: impl Into<String>, id: i64) {
        self.0.insert(name.into(), id);
    }

    /// Returns the id registered for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    /// Returns the number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a dictionary from loosely typed JSON values, coercing each id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFieldId`] if an id is neither an integer
    /// nor a string holding one.
    pub fn from_values<I, K>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut dictionary = Self::new();
        for (name, value) in entries {
            let name = name.into();
            let id = coerce_field_id(&name, &value)?;
            dictionary.0.insert(name, id);
        }
        Ok(dictionary)
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for FieldDictionary {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'de> Deserialize<'de> for FieldDictionary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Self::from_values(raw).map_err(de::Error::custom)
    }
}

/// Named field dictionaries supplied by configuration.
///
/// # Example
///
/// ```rust
/// use esputnik_api::{Dictionaries, FieldDictionary};
///
/// let mut dictionaries = Dictionaries::new();
/// dictionaries.insert("default", [("plan", 7)].into_iter().collect::<FieldDictionary>());
/// assert_eq!(dictionaries.default_dictionary().get("plan"), Some(7));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Dictionaries(BTreeMap<String, FieldDictionary>);

impl Dictionaries {
    /// Creates an empty set of dictionaries.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Registers a dictionary under `name`.
    pub fn insert(&mut self, name: impl Into<String>, dictionary: FieldDictionary) {
        self.0.insert(name.into(), dictionary);
    }

    /// Returns the dictionary registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDictionary> {
        self.0.get(name)
    }

    /// Returns the dictionary used for contact normalization.
    ///
    /// Falls back to an empty dictionary when no `default` entry exists.
    #[must_use]
    pub fn default_dictionary(&self) -> &FieldDictionary {
        self.get(DEFAULT_DICTIONARY).unwrap_or_else(|| {
            tracing::debug!("No '{DEFAULT_DICTIONARY}' field dictionary configured, custom fields will be dropped");
            &EMPTY_DICTIONARY
        })
    }
}

impl From<FieldDictionary> for Dictionaries {
    fn from(dictionary: FieldDictionary) -> Self {
        let mut dictionaries = Self::new();
        dictionaries.insert(DEFAULT_DICTIONARY, dictionary);
        dictionaries
    }
}

/// Reads a custom-field id from a JSON number or numeric string.
pub(crate) fn coerce_field_id(field: &str, value: &Value) -> Result<i64, ConfigError> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    id.ok_or_else(|| ConfigError::InvalidFieldId {
        field: field.to_string(),
        value: match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_ids_are_coerced_to_integers() {
        let dictionary: FieldDictionary =
            serde_json::from_value(json!({"plan": "101", "active": 202})).unwrap();
        assert_eq!(dictionary.get("plan"), Some(101));
        assert_eq!(dictionary.get("active"), Some(202));
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let result = FieldDictionary::from_values([("plan", json!("free"))]);
        assert_eq!(
            result,
            Err(ConfigError::InvalidFieldId {
                field: "plan".to_string(),
                value: "free".to_string(),
            })
        );

        assert!(serde_json::from_value::<FieldDictionary>(json!({"plan": 1.5})).is_err());
        assert!(serde_json::from_value::<FieldDictionary>(json!({"plan": null})).is_err());
    }

    #[test]
    fn test_default_dictionary_falls_back_to_empty() {
        let dictionaries = Dictionaries::new();
        assert!(dictionaries.default_dictionary().is_empty());
    }

    #[test]
    fn test_dictionaries_deserialize_by_name() {
        let dictionaries: Dictionaries = serde_json::from_value(json!({
            "default": {"plan": "5"},
            "legacy": {"plan": 6}
        }))
        .unwrap();

        assert_eq!(dictionaries.default_dictionary().get("plan"), Some(5));
        assert_eq!(dictionaries.get("legacy").unwrap().get("plan"), Some(6));
    }

    #[test]
    fn test_single_dictionary_converts_to_default_entry() {
        let dictionaries: Dictionaries = [("a", 10)].into_iter().collect::<FieldDictionary>().into();
        assert_eq!(dictionaries.default_dictionary().get("a"), Some(10));
    }
}
