//! Contact records as accepted by the bulk contact update.
//!
//! A [`Contact`] is an open JSON object: a handful of standard attributes
//! (see [`STANDARD_CONTACT_FIELDS`]), arbitrary pass-through keys such as
//! `channels`, and an optional custom-field payload under `fields`.
//!
//! The custom-field payload is a [`CustomFields`] union. Callers may address
//! custom fields by name ([`CustomFields::Raw`]); the wire format requires the
//! id-keyed list ([`CustomFields::Canonical`]).

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::coerce_field_id;

/// Key holding the custom-field payload on the wire.
const FIELDS_KEY: &str = "fields";

/// Top-level contact attributes recognized by the remote API.
pub const STANDARD_CONTACT_FIELDS: [&str; 14] = [
    "firstName",
    "lastName",
    "address",
    "email",
    "sms",
    "mobilepush",
    "webpush",
    "contactKey",
    "ordersInfo",
    "town",
    "region",
    "postcode",
    "languageCode",
    "timeZone",
];

/// One entry of the canonical custom-field list.
///
/// Keys besides `id` and `value` are kept in [`extra`](Self::extra) and sent
/// back as given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    /// Numeric custom-field id. Numeric strings are accepted on input.
    #[serde(deserialize_with = "deserialize_field_id")]
    pub id: i64,
    /// Field value, passed through untouched.
    pub value: Value,
    /// Any other keys of the entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomField {
    /// Creates a custom-field entry.
    #[must_use]
    pub fn new(id: i64, value: impl Into<Value>) -> Self {
        Self {
            id,
            value: value.into(),
            extra: Map::new(),
        }
    }
}

fn deserialize_field_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    coerce_field_id("id", &raw).map_err(de::Error::custom)
}

/// The custom-field payload of a contact.
///
/// On input the shape decides the variant: a JSON array is
/// [`Canonical`](Self::Canonical), a JSON object is [`Raw`](Self::Raw).
/// Any other shape is rejected.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CustomFields {
    /// Already in wire form.
    Canonical(Vec<CustomField>),
    /// Field name to value, resolved through a field dictionary.
    Raw(Map<String, Value>),
}

impl CustomFields {
    /// Reads a custom-field payload from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending entry if a list entry lacks an
    /// integer `id` or a `value`, or if `value` is neither a list nor a map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use esputnik_api::contacts::CustomFields;
    /// use serde_json::json;
    ///
    /// let error = CustomFields::from_value(json!([{"id": 5}])).unwrap_err();
    /// assert!(error.to_string().contains("index 0"));
    /// ```
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| {
                    serde_json::from_value(entry).map_err(|e| {
                        invalid(format!("invalid custom field at index {index}: {e}"))
                    })
                })
                .collect::<Result<Vec<CustomField>, _>>()
                .map(Self::Canonical),
            Value::Object(map) => Ok(Self::Raw(map)),
            other => Err(invalid(format!(
                "custom fields must be a list of {{id, value}} entries or a map of names to values, got {other}"
            ))),
        }
    }

    /// Returns `true` for the wire form.
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        matches!(self, Self::Canonical(_))
    }

    /// Returns the canonical list, or `None` while still in raw form.
    #[must_use]
    pub fn as_canonical(&self) -> Option<&[CustomField]> {
        match self {
            Self::Canonical(list) => Some(list),
            Self::Raw(_) => None,
        }
    }
}

fn invalid(message: String) -> serde_json::Error {
    de::Error::custom(message)
}

impl<'de> Deserialize<'de> for CustomFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

impl From<Vec<CustomField>> for CustomFields {
    fn from(list: Vec<CustomField>) -> Self {
        Self::Canonical(list)
    }
}

impl From<Map<String, Value>> for CustomFields {
    fn from(map: Map<String, Value>) -> Self {
        Self::Raw(map)
    }
}

/// A contact record.
///
/// The custom-field payload always lives in [`fields`](Self::fields), never
/// among the other attributes: setting the `fields` key through
/// [`insert`](Self::insert) or [`with`](Self::with) parses it as
/// [`CustomFields`].
///
/// # Example
///
/// ```rust
/// use esputnik_api::contacts::Contact;
/// use serde_json::json;
///
/// let contact: Contact = serde_json::from_value(json!({
///     "email": "ann@example.com",
///     "channels": [{"type": "email", "value": "ann@example.com"}],
///     "fields": {"plan": "free"}
/// })).unwrap();
///
/// assert_eq!(contact.get("email"), Some(&json!("ann@example.com")));
/// assert!(!contact.fields.as_ref().unwrap().is_canonical());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Custom-field payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<CustomFields>,

    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Contact {
    /// Creates an empty contact.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a top-level attribute and returns the contact.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is `fields` and `value` is not a valid
    /// custom-field payload.
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, serde_json::Error> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Sets the custom-field payload and returns the contact.
    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<CustomFields>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sets a top-level attribute, returning the previous value.
    ///
    /// The `fields` key replaces the custom-field payload; `null` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is `fields` and `value` is not a valid
    /// custom-field payload. The contact is left unchanged in that case.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, serde_json::Error> {
        let key = key.into();
        let value = value.into();
        if key != FIELDS_KEY {
            return Ok(self.attributes.insert(key, value));
        }

        let fields = match value {
            Value::Null => None,
            other => Some(CustomFields::from_value(other)?),
        };
        std::mem::replace(&mut self.fields, fields)
            .map(serde_json::to_value)
            .transpose()
    }

    /// Removes a top-level attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// Returns a top-level attribute other than `fields`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns `true` if the record carries `key` among its attributes.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Returns every attribute other than `fields`.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns the standard attributes present on this record, in canonical order.
    pub fn standard_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        STANDARD_CONTACT_FIELDS
            .into_iter()
            .filter(|name| self.contains(name))
    }
}
