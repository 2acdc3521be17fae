//! Integration tests for the reqwest adapter against a local mock server.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::net::TcpListener;
use std::time::Duration;

use probe_application::ports::{HttpClient, HttpClientError};
use probe_domain::{
    ClientCreateRequest, ClientField, ClientValues, HarnessSettings, PreparedRequest,
};
use probe_infrastructure::ReqwestHttpClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request_for(server: &MockServer, body: ClientCreateRequest) -> PreparedRequest {
    let url = HarnessSettings::for_host(server.uri())
        .endpoint_url()
        .expect("mock server uri is a valid host");
    PreparedRequest::new(url, body)
}

#[tokio::test]
async fn test_posts_client_create_body_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/client-mgmt/oidc-client"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "requestTime": "2011-10-05T14:48:00.000Z",
            "request": {
                "clientId": "e-health-service",
                "clientName": "Health Service",
                "relyingPartyId": "bharath-gov",
                "logoUri": "http://example.com",
                "publicKey": {},
                "authContextRefs": ["idbb:acr:generated-code"],
                "userClaims": ["name"],
                "grantTypes": ["authorization_code"],
                "clientAuthMethods": ["private_key_jwt"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseTime": "2011-10-05T14:48:01.000Z",
            "response": {"clientId": "e-health-service", "status": "ACTIVE", "errors": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestHttpClient::new().expect("client");
    let response = client
        .send(&request_for(&server, ClientCreateRequest::default()))
        .await
        .expect("request should succeed");

    assert_eq!(response.status, 200);
    assert_eq!(response.get_header("content-type"), Some("application/json"));
    assert_eq!(response.client_id(), Some("e-health-service"));
    assert!(response.duration > Duration::ZERO);
}

#[tokio::test]
async fn test_malformed_values_are_forwarded_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/client-mgmt/oidc-client"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "response": {"errors": [{"errorCode": "invalid_uri", "errorMessage": "bad logo"}]}
        })))
        .mount(&server)
        .await;

    let body: ClientCreateRequest = ClientValues::with_invalid(ClientField::LogoUri, "not-a-url").into();
    let client = ReqwestHttpClient::new().expect("client");
    let response = client
        .send(&request_for(&server, body))
        .await
        .expect("non-2xx is still a response");

    assert_eq!(response.status, 400);

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    let sent: serde_json::Value = received[0].body_json().expect("json body");
    assert_eq!(sent["request"]["logoUri"], "not-a-url");
    assert_eq!(sent["request"]["clientName"], "e-health-service");
}

#[tokio::test]
async fn test_repeated_header_keeps_last_value() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("x-trace", "first")
                .append_header("x-trace", "second"),
        )
        .mount(&server)
        .await;

    let client = ReqwestHttpClient::new().expect("client");
    let response = client
        .send(&request_for(&server, ClientCreateRequest::default()))
        .await
        .expect("request should succeed");

    assert_eq!(response.get_header("x-trace"), Some("second"));
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = ReqwestHttpClient::new().expect("client");
    let request = request_for(&server, ClientCreateRequest::default()).with_timeout_ms(Some(50));
    let result = client.send(&request).await;

    assert_eq!(
        result,
        Err(HttpClientError::Timeout {
            timeout_ms: Some(50)
        })
    );
}

#[tokio::test]
async fn test_connection_refused_is_reported() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let url = HarnessSettings::for_host(format!("http://127.0.0.1:{port}/"))
        .endpoint_url()
        .expect("valid url");
    let client = ReqwestHttpClient::new().expect("client");
    let result = client
        .send(&PreparedRequest::new(url, ClientCreateRequest::default()))
        .await;

    match result {
        Err(HttpClientError::ConnectionRefused { host, port: refused }) => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(refused, port);
        }
        other => panic!("expected connection refused, got {other:?}"),
    }
}
