//! URL building for operation endpoints.
//!
//! Endpoint templates are paths relative to the versioned API root and may
//! contain the [`ID_PLACEHOLDER`] token, e.g. `message/{{id}}/send`.
//!
//! # Example
//!
//! ```rust
//! use esputnik_api::operations::build_url;
//!
//! let url = build_url("https://esputnik.com", "v1", "message/{{id}}/send", Some("42"));
//! assert_eq!(url, "https://esputnik.com/api/v1/message/42/send");
//! ```

use std::fmt::Display;

/// Placeholder substituted with the id passed to an operation call.
pub const ID_PLACEHOLDER: &str = "{{id}}";

/// Replaces every [`ID_PLACEHOLDER`] in `template` with `id`.
///
/// Without an id the template is returned verbatim, placeholder included.
///
/// # Example
///
/// ```rust
/// use esputnik_api::operations::substitute_id;
///
/// assert_eq!(substitute_id("contact/{{id}}", Some(&7)), "contact/7");
/// assert_eq!(substitute_id::<u32>("contact/{{id}}", None), "contact/{{id}}");
/// ```
#[must_use]
pub fn substitute_id<V: Display + ?Sized>(template: &str, id: Option<&V>) -> String {
    match id {
        Some(id) => template.replace(ID_PLACEHOLDER, &id.to_string()),
        None => template.to_string(),
    }
}

/// Builds the absolute URL `{host}/api/{version}/{path}`.
///
/// No slash normalization is performed on any part.
#[must_use]
pub fn build_url<V: Display + ?Sized>(
    host: &str,
    version: impl Display,
    template: &str,
    id: Option<&V>,
) -> String {
    format!("{host}/api/{version}/{}", substitute_id(template, id))
}
