//! Scenario executor end-to-end against the stub service.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod support;

use pretty_assertions::assert_eq;
use probe_application::ScenarioError;
use probe_domain::{
    ClientField, ClientValues, HarnessSettings, ResponseSchemas, SchemaVariant,
};
use oidc_probe::{ClientCreateExecutor, ScenarioContext};
use support::stub_service::ClientRegistryStub;
use wiremock::MockServer;

async fn setup() -> (MockServer, ScenarioContext) {
    let server = ClientRegistryStub::start().await;
    let context = ScenarioContext::new(
        HarnessSettings::for_host(server.uri()),
        &ResponseSchemas::default(),
    )
    .expect("scenario context");
    (server, context)
}

async fn send(executor: &mut ClientCreateExecutor) {
    executor.dispatch().await.expect("dispatch should succeed");
}

#[tokio::test]
async fn test_valid_request_passes_every_assertion() {
    let (_server, context) = setup().await;
    let mut executor = context.executor();

    executor
        .prepare_valid(ClientValues::default())
        .expect("prepare");
    send(&mut executor).await;

    executor.expect_response_time_below(15_000).expect("timely");
    executor.expect_status(200).expect("status");
    executor
        .expect_header("content-type", "application/json")
        .expect("content type");
    executor
        .expect_schema(SchemaVariant::Success)
        .expect("success schema");
    executor
        .expect_client_id("e-health-service")
        .expect("client id echo");
}

#[tokio::test]
async fn test_submitted_client_id_is_echoed() {
    let (_server, context) = setup().await;
    let mut executor = context.executor();

    executor
        .prepare_with_redirect_uris(
            ClientValues::default().with_field(ClientField::ClientId, "health-portal"),
            "https://example.com/callback",
        )
        .expect("prepare");
    send(&mut executor).await;

    let response = executor.response().expect("captured");
    assert_eq!(response.client_id(), Some("health-portal"));
    assert!(executor.expect_client_id("e-health-service").is_err());
}

#[tokio::test]
async fn test_every_invalid_field_yields_error_schema_body() {
    let (_server, context) = setup().await;

    let cases = [
        (ClientField::RequestTime, "2011-10-05"),
        (ClientField::AuthContextRefs, "invalid_acr"),
        (ClientField::UserClaims, "invalid_claim"),
        (ClientField::GrantTypes, "implicit"),
        (ClientField::ClientAuthMethods, "client_secret_basic"),
        (ClientField::ClientName, ""),
        (ClientField::RelyingPartyId, ""),
        (ClientField::LogoUri, "not-a-url"),
        (ClientField::ClientId, ""),
    ];

    for (field, value) in cases {
        let mut executor = context.executor();
        executor.prepare_invalid(field, value).expect("prepare");
        send(&mut executor).await;

        executor
            .expect_schema(SchemaVariant::Error)
            .unwrap_or_else(|e| panic!("{field}: {e}"));
        assert!(
            executor.expect_schema(SchemaVariant::Success).is_err(),
            "{field}: populated errors must not pass the success schema"
        );
        executor.close();
    }
}

#[tokio::test]
async fn test_malformed_logo_uri_still_gets_schema_valid_body() {
    let (_server, context) = setup().await;
    let mut executor = context.executor();

    executor
        .prepare_invalid(ClientField::LogoUri, "not-a-url")
        .expect("prepare");
    send(&mut executor).await;

    executor
        .expect_schema(SchemaVariant::Error)
        .expect("error schema");
    assert!(matches!(
        executor.expect_status(200),
        Err(ScenarioError::Expectation { .. })
    ));
}

#[tokio::test]
async fn test_second_dispatch_is_rejected() {
    let (_server, context) = setup().await;
    let mut executor = context.executor();

    executor
        .prepare_valid(ClientValues::default())
        .expect("prepare");
    send(&mut executor).await;

    assert_eq!(
        executor.dispatch().await.map(|_| ()),
        Err(ScenarioError::AlreadyDispatched)
    );
    assert_eq!(
        executor
            .prepare_valid(ClientValues::default())
            .map(|_| ()),
        Err(ScenarioError::AlreadyDispatched)
    );
}

#[tokio::test]
async fn test_unreachable_service_is_an_http_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let context = ScenarioContext::new(
        HarnessSettings::for_host(format!("http://127.0.0.1:{port}/")),
        &ResponseSchemas::default(),
    )
    .expect("scenario context");
    let mut executor = context.executor();

    executor
        .prepare_valid(ClientValues::default())
        .expect("prepare");
    let result = executor.dispatch().await.map(|_| ());

    assert!(matches!(result, Err(ScenarioError::Http(_))));
    assert_eq!(executor.response().map(|_| ()), Err(ScenarioError::NotDispatched));
}
