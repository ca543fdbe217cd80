//! Namespace nodes bound to a live client.
//!
//! [`Scope`] walks the compiled tree segment by segment; [`Operation`] is a
//! callable that turns one definition plus per-call arguments into a single
//! request on the shared [`HttpClient`].

use serde_json::Value;

use crate::clients::{HttpClient, HttpError, RequestBody, RequestOptions};
use crate::operations::namespace::Namespace;
use crate::operations::table::OperationDefinition;

/// A namespace node paired with the client its operations run on.
///
/// # Example
///
/// ```rust,ignore
/// let api = esputnik.api();
/// let add = api.get("emails")?.get("unsubscribed")?.operation()?;
/// add.call(Some(json!({"emails": ["a@x.io"]}).into()), RequestOptions::new()).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Scope<'a> {
    node: &'a Namespace,
    client: &'a HttpClient,
}

impl<'a> Scope<'a> {
    /// Binds `node` to `client`.
    #[must_use]
    pub const fn new(node: &'a Namespace, client: &'a HttpClient) -> Self {
        Self { node, client }
    }

    /// Returns the child scope for `segment`.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<Self> {
        self.node.child(segment).map(|node| Self::new(node, self.client))
    }

    /// Returns the callable bound to this node, if it has one.
    #[must_use]
    pub fn operation(&self) -> Option<Operation<'a>> {
        self.node
            .operation()
            .map(|definition| Operation::new(*definition, self.client))
    }

    /// Resolves a dotted name below this scope to a callable.
    #[must_use]
    pub fn resolve(&self, dotted: &str) -> Option<Operation<'a>> {
        self.node
            .resolve(dotted)
            .map(|definition| Operation::new(*definition, self.client))
    }

    /// Returns the names of the direct children of this scope.
    pub fn segments(&self) -> impl Iterator<Item = &'static str> + 'a {
        self.node.segments()
    }

    /// Returns the underlying namespace node.
    #[must_use]
    pub const fn namespace(&self) -> &'a Namespace {
        self.node
    }
}

/// A callable operation bound to a client.
#[derive(Clone, Copy, Debug)]
pub struct Operation<'a> {
    definition: OperationDefinition,
    client: &'a HttpClient,
}

impl<'a> Operation<'a> {
    /// Binds `definition` to `client`.
    #[must_use]
    pub const fn new(definition: OperationDefinition, client: &'a HttpClient) -> Self {
        Self { definition, client }
    }

    /// Returns the definition behind this callable.
    #[must_use]
    pub const fn definition(&self) -> &OperationDefinition {
        &self.definition
    }

    /// Performs the operation and returns the decoded response body.
    ///
    /// The HTTP method is the definition's fixed method, or `POST` when a
    /// body is given and `GET` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request is invalid, the transport fails,
    /// or the server answers with a status of 400 or above.
    pub async fn call(
        &self,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Value, HttpError> {
        let request = self.definition.request(body, options)?;
        tracing::debug!("Calling operation '{}'", self.definition.name);
        Ok(self.client.request(request).await?.into_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::config::{EsputnikConfig, Password, Username};

    fn create_test_client() -> HttpClient {
        let config = EsputnikConfig::builder()
            .username(Username::new("user").unwrap())
            .password(Password::new("pass").unwrap())
            .build()
            .unwrap();
        HttpClient::new(&config).unwrap()
    }

    #[test]
    fn test_scope_walks_segments() {
        let client = create_test_client();
        let api = Scope::new(Namespace::standard(), &client);

        let add = api
            .get("emails")
            .and_then(|s| s.get("unsubscribed"))
            .and_then(|s| s.get("add"))
            .and_then(|s| s.operation())
            .unwrap();
        assert_eq!(add.definition().endpoint, "emails/unsubscribed/add");

        assert!(api.get("emails").unwrap().operation().is_none());
        assert!(api.get("missing").is_none());
    }

    #[test]
    fn test_scope_resolves_dotted_names() {
        let client = create_test_client();
        let api = Scope::new(Namespace::standard(), &client);

        let update = api.resolve("contact.id").unwrap();
        assert_eq!(update.definition().http_method, Some(HttpMethod::Put));

        let message = api.get("message").unwrap();
        assert_eq!(
            message.resolve("id.smartsend").unwrap().definition().endpoint,
            "message/{{id}}/smartsend"
        );
        assert!(message.resolve("id").is_none());
    }

    #[test]
    fn test_scope_lists_children() {
        let client = create_test_client();
        let api = Scope::new(Namespace::standard(), &client);
        let message: Vec<_> = api.get("message").unwrap().segments().collect();
        assert_eq!(message, vec!["email", "id", "sms"]);
    }
}
