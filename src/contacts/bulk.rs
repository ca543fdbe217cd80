//! The bulk contact update request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::FieldDictionary;
use crate::contacts::contact::Contact;
use crate::contacts::normalize::{normalize_contact, TouchedFields};
use crate::error::ValidationError;

/// Contact field used for deduplication when the caller names none.
pub const DEFAULT_DEDUPE_ON: &str = "email";

/// Body of the `contacts` bulk update operation.
///
/// Keys other than the ones modelled here (`restoreDeleted`, `groupNames`,
/// `eventKeyForNewContacts`, ...) are kept in [`extra`](Self::extra) and sent
/// as given.
///
/// # Example
///
/// ```rust
/// use esputnik_api::contacts::{Contact, ContactsBulkUpdate};
///
/// let contact = Contact::new().with("email", "ann@example.com").unwrap();
/// let update = ContactsBulkUpdate::new(vec![contact]).with("restoreDeleted", true);
///
/// let body = serde_json::to_value(&update).unwrap();
/// assert_eq!(body["restoreDeleted"], true);
/// assert_eq!(body["contacts"][0]["email"], "ann@example.com");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsBulkUpdate {
    /// Contacts to create or update.
    #[serde(default)]
    pub contacts: Vec<Contact>,

    /// Field used to match incoming contacts with existing ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedupe_on: Option<String>,

    /// Standard attributes the update may change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_fields: Option<Vec<String>>,

    /// Custom-field ids the update may change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_ids: Option<Vec<i64>>,

    /// Any other request keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContactsBulkUpdate {
    /// Creates an update for the given contacts.
    #[must_use]
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            ..Self::default()
        }
    }

    /// Sets the deduplication field.
    #[must_use]
    pub fn dedupe_on(mut self, field: impl Into<String>) -> Self {
        self.dedupe_on = Some(field.into());
        self
    }

    /// Sets the standard attributes to update explicitly.
    #[must_use]
    pub fn contact_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contact_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the custom-field ids to update explicitly.
    #[must_use]
    pub fn custom_field_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.custom_field_ids = Some(ids.into_iter().collect());
        self
    }

    /// Adds a pass-through request key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Readies the update for sending.
    ///
    /// Defaults `dedupeOn` to [`DEFAULT_DEDUPE_ON`], normalizes every contact
    /// against `dictionary` and fills `contactFields` and `customFieldIds`
    /// from what the contacts carry. A list the caller set to a non-empty
    /// value is never replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingContacts`] if there are no contacts.
    pub fn prepare(&mut self, dictionary: &FieldDictionary) -> Result<(), ValidationError> {
        if self.contacts.is_empty() {
            return Err(ValidationError::MissingContacts);
        }

        self.dedupe_on
            .get_or_insert_with(|| DEFAULT_DEDUPE_ON.to_string());

        let mut touched = TouchedFields::new();
        for contact in &mut self.contacts {
            normalize_contact(contact, dictionary, &mut touched);
        }
        let (contact_fields, custom_field_ids) = touched.into_parts();

        backfill("contactFields", &mut self.contact_fields, contact_fields);
        backfill("customFieldIds", &mut self.custom_field_ids, custom_field_ids);

        Ok(())
    }
}

fn backfill<T: std::fmt::Debug>(name: &str, target: &mut Option<Vec<T>>, touched: Vec<T>) {
    let caller_supplied = target.as_ref().is_some_and(|list| !list.is_empty());
    if caller_supplied || touched.is_empty() {
        return;
    }
    tracing::debug!("Filling {} from contacts: {:?}", name, touched);
    *target = Some(touched);
}
