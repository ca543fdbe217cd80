//! The eSputnik client facade.
//!
//! [`Esputnik`] ties the pieces together: it owns the [`HttpClient`], exposes
//! the compiled operation namespace, and implements the bulk contact update
//! on top of the `contacts` operation.

use serde_json::Value;

use crate::clients::{HttpClient, RequestBody, RequestOptions};
use crate::config::{Dictionaries, EsputnikConfig, Password, Username};
use crate::contacts::ContactsBulkUpdate;
use crate::error::EsputnikError;
use crate::operations::{Namespace, Operation, Scope, CONTACTS_OPERATION};

/// An activated eSputnik client.
///
/// The operation namespace is compiled once per process and shared by every
/// client. Dropping the client releases its credentials and connection pool.
///
/// # Thread Safety
///
/// `Esputnik` is `Send + Sync`. Each call allocates its own state, so one
/// client can serve concurrent tasks.
///
/// # Example
///
/// ```rust,ignore
/// use esputnik_api::{Esputnik, EsputnikConfig, Username, Password, RequestOptions};
/// use serde_json::json;
///
/// let config = EsputnikConfig::builder()
///     .username(Username::new("user@example.com")?)
///     .password(Password::new("secret")?)
///     .build()?;
/// let esputnik = Esputnik::new(config)?;
///
/// // Call by dotted name
/// let info = esputnik.call("account.info", None, RequestOptions::new()).await?;
///
/// // Or walk the namespace
/// let add = esputnik.api().resolve("emails.unsubscribed.add").unwrap();
/// add.call(Some(json!({"emails": ["a@example.com"]}).into()), RequestOptions::new()).await?;
/// ```
#[derive(Debug)]
pub struct Esputnik {
    http_client: HttpClient,
    dictionaries: Dictionaries,
}

// Verify Esputnik is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Esputnik>();
};

impl Esputnik {
    /// Activates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EsputnikError::Http`] if the HTTP client cannot be created.
    pub fn new(config: EsputnikConfig) -> Result<Self, EsputnikError> {
        let http_client = HttpClient::new(&config)?;
        tracing::debug!(
            "eSputnik client activated for {} ({} operations, API {})",
            config.host(),
            Namespace::standard().operations().len(),
            config.api_version()
        );

        Ok(Self {
            http_client,
            dictionaries: config.dictionaries().clone(),
        })
    }

    /// Returns the underlying request executor.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the configured field dictionaries.
    #[must_use]
    pub const fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    /// Replaces the account credentials.
    pub fn refresh_credentials(&mut self, username: Username, password: Password) {
        self.http_client.refresh_credentials(username, password);
    }

    /// Returns the root of the operation namespace, bound to this client.
    #[must_use]
    pub fn api(&self) -> Scope<'_> {
        Scope::new(Namespace::standard(), &self.http_client)
    }

    /// Looks up an operation by dotted name.
    ///
    /// # Errors
    ///
    /// Returns [`EsputnikError::UnknownOperation`] if no operation is
    /// registered under `name`.
    pub fn operation(&self, name: &str) -> Result<Operation<'_>, EsputnikError> {
        self.api()
            .resolve(name)
            .ok_or_else(|| EsputnikError::UnknownOperation {
                name: name.to_string(),
            })
    }

    /// Calls an operation by dotted name.
    ///
    /// # Errors
    ///
    /// Returns [`EsputnikError::UnknownOperation`] for an unknown name and
    /// [`EsputnikError::Http`] if the request fails.
    pub async fn call(
        &self,
        name: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Value, EsputnikError> {
        let operation = self.operation(name)?;
        Ok(operation.call(body, options).await?)
    }

    /// Creates or updates contacts in bulk.
    ///
    /// Named custom fields are resolved through the `default` field
    /// dictionary, and `contactFields`/`customFieldIds` are filled from the
    /// contacts when not given. See [`ContactsBulkUpdate::prepare`].
    ///
    /// # Errors
    ///
    /// Returns [`EsputnikError::Validation`] without sending anything if
    /// there are no contacts, and [`EsputnikError::Http`] if the request
    /// fails.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use esputnik_api::contacts::{Contact, ContactsBulkUpdate};
    /// use serde_json::json;
    ///
    /// let contact = Contact::new()
    ///     .with("email", "ann@example.com")?
    ///     .with_fields(json!({"plan": "free"}).as_object().cloned().unwrap());
    ///
    /// let result = esputnik
    ///     .add_contacts(ContactsBulkUpdate::new(vec![contact]).with("restoreDeleted", true))
    ///     .await?;
    /// println!("session: {}", result["asyncSessionId"]);
    /// ```
    pub async fn add_contacts(&self, mut update: ContactsBulkUpdate) -> Result<Value, EsputnikError> {
        update.prepare(self.dictionaries.default_dictionary())?;
        let body = serde_json::to_value(&update)?;
        self.call(
            CONTACTS_OPERATION,
            Some(RequestBody::Json(body)),
            RequestOptions::new(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::error::ValidationError;

    fn create_test_client() -> Esputnik {
        let config = EsputnikConfig::builder()
            .username(Username::new("user").unwrap())
            .password(Password::new("pass").unwrap())
            .build()
            .unwrap();
        Esputnik::new(config).unwrap()
    }

    #[test]
    fn test_operation_lookup_by_name() {
        let esputnik = create_test_client();

        let update = esputnik.operation("contact.id").unwrap();
        assert_eq!(update.definition().http_method, Some(HttpMethod::Put));

        let result = esputnik.operation("contact.delete");
        assert!(matches!(
            result,
            Err(EsputnikError::UnknownOperation { name }) if name == "contact.delete"
        ));
    }

    #[test]
    fn test_api_exposes_every_top_level_segment() {
        let esputnik = create_test_client();
        let segments: Vec<_> = esputnik.api().segments().collect();
        assert_eq!(
            segments,
            vec!["account", "contact", "contacts", "emails", "event", "message", "orders"]
        );
    }

    #[test]
    fn test_add_contacts_rejects_empty_batch_before_sending() {
        let esputnik = create_test_client();
        let result = tokio_test::block_on(esputnik.add_contacts(ContactsBulkUpdate::default()));
        assert!(matches!(
            result,
            Err(EsputnikError::Validation(ValidationError::MissingContacts))
        ));
    }

    #[test]
    fn test_unknown_operation_fails_without_sending() {
        let esputnik = create_test_client();
        let result =
            tokio_test::block_on(esputnik.call("nope", None, RequestOptions::new()));
        assert!(matches!(result, Err(EsputnikError::UnknownOperation { .. })));
    }

    #[test]
    fn test_missing_default_dictionary_is_empty() {
        let esputnik = create_test_client();
        assert!(esputnik.dictionaries().default_dictionary().is_empty());
    }
}
