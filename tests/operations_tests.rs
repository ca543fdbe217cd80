//! Integration tests for the compiled operation namespace.
//!
//! Every entry of the operation table is called through the facade against
//! a mock server, checking the method and path each one produces.

use esputnik_api::clients::HttpMethod;
use esputnik_api::operations::{substitute_id, Namespace, OPERATIONS};
use esputnik_api::{
    EsputnikConfig, Esputnik, EsputnikError, HostUrl, HttpError, Password, RequestOptions,
    Username,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(server: &MockServer) -> Esputnik {
    let config = EsputnikConfig::builder()
        .username(Username::new("user").unwrap())
        .password(Password::new("pass").unwrap())
        .host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    Esputnik::new(config).unwrap()
}

// ============================================================================
// Operation Table
// ============================================================================

#[tokio::test]
async fn test_every_operation_uses_its_method_and_path() {
    let server = MockServer::start().await;

    for definition in OPERATIONS {
        let verb = definition.http_method.unwrap_or(HttpMethod::Post);
        let expected_path = format!("/api/v1/{}", substitute_id(definition.endpoint, Some(&7)));
        Mock::given(method(verb.to_string().as_str()))
            .and(path(expected_path.as_str()))
            .and(header("Authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": definition.name})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let esputnik = create_test_client(&server);
    for definition in OPERATIONS {
        let result = esputnik
            .call(
                definition.name,
                Some(json!({"sample": true}).into()),
                RequestOptions::new().id(7),
            )
            .await
            .unwrap();
        assert_eq!(result, json!({"name": definition.name}));
    }
}

#[tokio::test]
async fn test_operations_without_body_use_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/account/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"organisationName": "Acme"})))
        .expect(1)
        .mount(&server)
        .await;

    let esputnik = create_test_client(&server);
    let info = esputnik
        .call("account.info", None, RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(info["organisationName"], "Acme");
}

#[tokio::test]
async fn test_fixed_method_applies_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/contact/55"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let esputnik = create_test_client(&server);
    let result = esputnik
        .call("contact.id", None, RequestOptions::new().id(55))
        .await
        .unwrap();

    assert_eq!(result, json!({"result": ""}));
}

// ============================================================================
// Namespace Navigation
// ============================================================================

#[tokio::test]
async fn test_sibling_leaves_under_shared_prefix_are_both_callable() {
    let server = MockServer::start().await;
    for leaf in ["add", "delete"] {
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/emails/unsubscribed/{leaf}").as_str()))
            .and(body_json(json!({"emails": ["a@example.com"]})))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;
    }

    let esputnik = create_test_client(&server);
    let unsubscribed = esputnik
        .api()
        .get("emails")
        .and_then(|scope| scope.get("unsubscribed"))
        .unwrap();

    for leaf in ["add", "delete"] {
        let operation = unsubscribed.get(leaf).and_then(|s| s.operation()).unwrap();
        let result = operation
            .call(
                Some(json!({"emails": ["a@example.com"]}).into()),
                RequestOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(result, json!({"result": "OK"}));
    }
}

#[tokio::test]
async fn test_container_node_is_also_callable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/contact/subscribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let esputnik = create_test_client(&server);
    let contact = esputnik.api().get("contact").unwrap();
    let body = json!({"channels": [{"type": "email", "value": "a@example.com"}]});

    let created = contact
        .operation()
        .unwrap()
        .call(Some(body.clone().into()), RequestOptions::new())
        .await
        .unwrap();
    let subscribed = contact
        .resolve("subscribe")
        .unwrap()
        .call(Some(body.into()), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(created, json!({"id": 1}));
    assert_eq!(subscribed, json!({"id": 2}));
}

#[test]
fn test_namespace_lists_every_operation() {
    let mut names: Vec<_> = Namespace::standard()
        .operations()
        .into_iter()
        .map(|op| op.name)
        .collect();
    names.sort_unstable();

    let mut expected: Vec<_> = OPERATIONS.iter().map(|op| op.name).collect();
    expected.sort_unstable();

    assert_eq!(names, expected);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_unknown_operation_is_reported() {
    let server = MockServer::start().await;
    let esputnik = create_test_client(&server);

    let result = esputnik.call("contacts.purge", None, RequestOptions::new()).await;

    let Err(error) = result else {
        panic!("expected an error");
    };
    assert!(matches!(error, EsputnikError::UnknownOperation { .. }));
    assert!(error.to_string().contains("contacts.purge"));
}

#[tokio::test]
async fn test_remote_failure_surfaces_through_facade() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/message/3/smartsend"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"error":"not_found","message":"no such message"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let esputnik = create_test_client(&server);
    let result = esputnik
        .call(
            "message.id.smartsend",
            Some(json!({"recipients": []}).into()),
            RequestOptions::new().id(3),
        )
        .await;

    let Err(EsputnikError::Http(HttpError::Response(error))) = result else {
        panic!("expected a remote error");
    };
    assert_eq!(error.code, 404);
    assert_eq!(error.to_string(), "not_found: no such message");
}
