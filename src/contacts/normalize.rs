//! Contact normalization.
//!
//! Normalizing a contact rewrites its custom fields into the canonical list
//! and records, in a [`TouchedFields`] accumulator shared across a batch,
//! which standard attributes and which custom-field ids the batch carries.

use serde_json::{Map, Value};

use crate::config::FieldDictionary;
use crate::contacts::contact::{Contact, CustomField, CustomFields};

/// Standard attributes and custom-field ids seen across a batch.
///
/// Both lists are deduplicated and keep first-insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchedFields {
    contact_fields: Vec<String>,
    custom_field_ids: Vec<i64>,
}

impl TouchedFields {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            contact_fields: Vec::new(),
            custom_field_ids: Vec::new(),
        }
    }

    /// Records a standard attribute name.
    pub fn touch_contact_field(&mut self, name: &str) {
        if !self.contact_fields.iter().any(|seen| seen == name) {
            self.contact_fields.push(name.to_string());
        }
    }

    /// Records a custom-field id.
    pub fn touch_custom_field(&mut self, id: i64) {
        if !self.custom_field_ids.contains(&id) {
            self.custom_field_ids.push(id);
        }
    }

    /// Returns the standard attribute names recorded so far.
    #[must_use]
    pub fn contact_fields(&self) -> &[String] {
        &self.contact_fields
    }

    /// Returns the custom-field ids recorded so far.
    #[must_use]
    pub fn custom_field_ids(&self) -> &[i64] {
        &self.custom_field_ids
    }

    /// Consumes the accumulator, returning both lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<i64>) {
        (self.contact_fields, self.custom_field_ids)
    }
}

/// Normalizes one contact in place.
///
/// Every standard attribute present on the contact is recorded in `touched`.
/// Custom fields in raw form are resolved through `dictionary`: each name
/// with a registered id becomes `{id, value}` and the id is recorded; names
/// without one are dropped. Canonical fields are left as they are, so
/// normalizing twice gives the same contact.
///
/// # Example
///
/// ```rust
/// use esputnik_api::config::FieldDictionary;
/// use esputnik_api::contacts::{normalize_contact, Contact, CustomField, CustomFields, TouchedFields};
/// use serde_json::json;
///
/// let dictionary: FieldDictionary = [("a", 10)].into_iter().collect();
/// let mut contact: Contact = serde_json::from_value(json!({"fields": {"a": 1, "b": 2}})).unwrap();
/// let mut touched = TouchedFields::new();
///
/// normalize_contact(&mut contact, &dictionary, &mut touched);
///
/// assert_eq!(contact.fields, Some(CustomFields::Canonical(vec![CustomField::new(10, 1)])));
/// assert_eq!(touched.custom_field_ids(), &[10]);
/// ```
pub fn normalize_contact(
    contact: &mut Contact,
    dictionary: &FieldDictionary,
    touched: &mut TouchedFields,
) {
    for name in contact.standard_fields() {
        touched.touch_contact_field(name);
    }

    if let Some(CustomFields::Raw(raw)) = &mut contact.fields {
        let raw = std::mem::take(raw);
        contact.fields = Some(CustomFields::Canonical(resolve_fields(
            raw, dictionary, touched,
        )));
    }
}

fn resolve_fields(
    raw: Map<String, Value>,
    dictionary: &FieldDictionary,
    touched: &mut TouchedFields,
) -> Vec<CustomField> {
    let mut resolved = Vec::with_capacity(raw.len());
    for (name, value) in raw {
        match dictionary.get(&name) {
            Some(id) => {
                touched.touch_custom_field(id);
                resolved.push(CustomField::new(id, value));
            }
            None => tracing::debug!("Dropping custom field '{}': not in the field dictionary", name),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dictionary() -> FieldDictionary {
        [("a", 10), ("plan", 12)].into_iter().collect()
    }

    fn contact(value: Value) -> Contact {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_raw_fields_are_resolved_and_unknown_names_dropped() {
        let mut c = contact(json!({"fields": {"a": 1, "b": 2}}));
        let mut touched = TouchedFields::new();

        normalize_contact(&mut c, &dictionary(), &mut touched);

        assert_eq!(
            c.fields,
            Some(CustomFields::Canonical(vec![CustomField::new(10, 1)]))
        );
        assert_eq!(touched.custom_field_ids(), &[10]);
        assert!(touched.contact_fields().is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut c = contact(json!({"email": "a@b.c", "fields": {"a": 1, "plan": "free"}}));
        let mut touched = TouchedFields::new();

        normalize_contact(&mut c, &dictionary(), &mut touched);
        let once = c.clone();
        normalize_contact(&mut c, &dictionary(), &mut touched);

        assert_eq!(c, once);
        assert_eq!(touched.custom_field_ids(), &[10, 12]);
        assert_eq!(touched.contact_fields(), &["email".to_string()]);
    }

    #[test]
    fn test_canonical_fields_are_untouched() {
        let mut c = contact(json!({"fields": [{"id": 99, "value": "x"}]}));
        let before = c.clone();
        let mut touched = TouchedFields::new();

        normalize_contact(&mut c, &dictionary(), &mut touched);

        assert_eq!(c, before);
        assert!(touched.custom_field_ids().is_empty());
    }

    #[test]
    fn test_contact_without_fields_only_records_standard_attributes() {
        let mut c = contact(json!({"firstName": "Ann", "sms": "+100", "channels": []}));
        let mut touched = TouchedFields::new();

        normalize_contact(&mut c, &dictionary(), &mut touched);

        assert!(c.fields.is_none());
        assert_eq!(touched.contact_fields(), &["firstName".to_string(), "sms".to_string()]);
    }

    #[test]
    fn test_empty_dictionary_drops_every_raw_field() {
        let mut c = contact(json!({"fields": {"a": 1}}));
        let mut touched = TouchedFields::new();

        normalize_contact(&mut c, &FieldDictionary::new(), &mut touched);

        assert_eq!(c.fields, Some(CustomFields::Canonical(Vec::new())));
        assert!(touched.custom_field_ids().is_empty());
    }

    #[test]
    fn test_accumulator_dedupes_in_first_insertion_order() {
        let mut touched = TouchedFields::new();
        for id in [5, 3, 5, 7, 3] {
            touched.touch_custom_field(id);
        }
        for name in ["lastName", "email", "lastName"] {
            touched.touch_contact_field(name);
        }

        let (fields, ids) = touched.into_parts();
        assert_eq!(ids, vec![5, 3, 7]);
        assert_eq!(fields, vec!["lastName".to_string(), "email".to_string()]);
    }

    #[test]
    fn test_fields_set_through_with_are_resolved() {
        let mut c = Contact::new()
            .with("email", "x@y.com")
            .and_then(|c| c.with("fields", json!({"a": 1})))
            .unwrap();
        let mut touched = TouchedFields::new();

        normalize_contact(&mut c, &[("a", 5)].into_iter().collect(), &mut touched);

        assert_eq!(
            c.fields,
            Some(CustomFields::Canonical(vec![CustomField::new(5, 1)]))
        );
        assert_eq!(touched.custom_field_ids(), &[5]);
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({"email": "x@y.com", "fields": [{"id": 5, "value": 1}]})
        );
    }

    #[test]
    fn test_raw_fields_resolve_in_caller_order() {
        let mut c = contact(json!({"fields": {"plan": "free", "a": 1}}));
        let mut touched = TouchedFields::new();

        normalize_contact(&mut c, &dictionary(), &mut touched);

        assert_eq!(
            c.fields,
            Some(CustomFields::Canonical(vec![
                CustomField::new(12, "free"),
                CustomField::new(10, 1),
            ]))
        );
        assert_eq!(touched.custom_field_ids(), &[12, 10]);
    }
}
