//! The static operation table.
//!
//! Every remote endpoint the client exposes is one [`OperationDefinition`]
//! in [`OPERATIONS`]. Adding an endpoint means adding one entry here.

use crate::clients::{HttpMethod, HttpRequest, InvalidHttpRequestError, RequestBody, RequestOptions};

/// Binds a dotted logical name to an endpoint template and HTTP method.
///
/// # Example
///
/// ```rust
/// use esputnik_api::clients::HttpMethod;
/// use esputnik_api::operations::OperationDefinition;
///
/// const UPDATE: OperationDefinition =
///     OperationDefinition::new("contact.id", "contact/{{id}}").with_method(HttpMethod::Put);
///
/// assert_eq!(UPDATE.segments().collect::<Vec<_>>(), vec!["contact", "id"]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationDefinition {
    /// Dot-delimited logical name, e.g. `emails.unsubscribed.add`.
    pub name: &'static str,
    /// Endpoint template relative to the versioned API root.
    pub endpoint: &'static str,
    /// Fixed HTTP method; derived from the body when `None`.
    pub http_method: Option<HttpMethod>,
}

impl OperationDefinition {
    /// Creates a definition whose method is derived per call.
    #[must_use]
    pub const fn new(name: &'static str, endpoint: &'static str) -> Self {
        Self {
            name,
            endpoint,
            http_method: None,
        }
    }

    /// Fixes the HTTP method of this definition.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    /// Returns the segments of the dotted name.
    pub fn segments(&self) -> impl Iterator<Item = &'static str> {
        self.name.split('.')
    }

    /// Builds the request envelope for one call of this operation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn request(
        &self,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<HttpRequest, InvalidHttpRequestError> {
        HttpRequest::builder(self.endpoint)
            .method_opt(self.http_method)
            .body_opt(body)
            .options(options)
            .build()
    }
}

/// The eSputnik operations exposed by the client.
pub const OPERATIONS: &[OperationDefinition] = &[
    OperationDefinition::new("contact.subscribe", "contact/subscribe"),
    OperationDefinition::new("contacts", "contacts"),
    OperationDefinition::new("contact", "contact"),
    OperationDefinition::new("contact.id", "contact/{{id}}").with_method(HttpMethod::Put),
    OperationDefinition::new("contacts.upload", "contacts/upload"),
    OperationDefinition::new("message.email", "message/email"),
    OperationDefinition::new("message.sms", "message/sms"),
    OperationDefinition::new("message.id.send", "message/{{id}}/send"),
    OperationDefinition::new("message.id.smartsend", "message/{{id}}/smartsend"),
    OperationDefinition::new("orders", "orders"),
    OperationDefinition::new("event", "event"),
    OperationDefinition::new("emails.unsubscribed.add", "emails/unsubscribed/add"),
    OperationDefinition::new("emails.unsubscribed.delete", "emails/unsubscribed/delete"),
    OperationDefinition::new("account.info", "account/info"),
];

/// Name of the bulk contact update operation.
pub const CONTACTS_OPERATION: &str = "contacts";
