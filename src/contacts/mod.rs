//! Contact records and the bulk contact update.
//!
//! The remote API identifies custom contact fields by numeric id. This
//! module lets callers use names instead: [`normalize_contact`] resolves
//! named custom fields through a [`FieldDictionary`](crate::config::FieldDictionary)
//! and [`ContactsBulkUpdate::prepare`] applies it to a whole batch, filling
//! the `contactFields` and `customFieldIds` lists the request needs.

mod bulk;
mod contact;
mod normalize;

pub use bulk::{ContactsBulkUpdate, DEFAULT_DEDUPE_ON};
pub use contact::{Contact, CustomField, CustomFields, STANDARD_CONTACT_FIELDS};
pub use normalize::{normalize_contact, TouchedFields};
