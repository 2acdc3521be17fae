//! In-process stand-in for the client-management service.
//!
//! Accepts the same body as the real endpoint and applies a small set of
//! field rules, answering 200 with the echoed `clientId` or 400 with a
//! populated `errors` array. Always answers with `application/json`.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const KNOWN_ACRS: &[&str] = &[
    "idbb:acr:generated-code",
    "mosip:idp:acr:static-code",
    "mosip:idp:acr:biometrics",
];
const KNOWN_CLAIMS: &[&str] = &["name", "email", "gender", "phone_number", "birthdate"];

/// Field rules of the stub service.
pub struct ClientRegistryStub {
    client_id: Regex,
}

impl ClientRegistryStub {
    /// Creates the stub with its client id pattern compiled.
    pub fn new() -> Self {
        Self {
            client_id: Regex::new("^[A-Za-z0-9_-]{1,50}$").expect("static pattern"),
        }
    }

    /// Starts a mock server serving `POST /client-mgmt/oidc-client`.
    pub async fn start() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/client-mgmt/oidc-client"))
            .respond_with(Self::new())
            .mount(&server)
            .await;
        server
    }

    fn validate(&self, body: &Value) -> Result<String, (&'static str, String)> {
        let request_time = text(body, "/requestTime");
        if DateTime::parse_from_rfc3339(request_time).is_err() {
            return Err(("invalid_request", format!("requestTime '{request_time}' is not ISO-8601")));
        }

        let client_id = text(body, "/request/clientId");
        if !self.client_id.is_match(client_id) {
            return Err(("invalid_client_id", "clientId is malformed".to_string()));
        }
        if text(body, "/request/clientName").trim().is_empty() {
            return Err(("invalid_client_name", "clientName must not be blank".to_string()));
        }
        if text(body, "/request/relyingPartyId").trim().is_empty() {
            return Err(("invalid_rp_id", "relyingPartyId must not be blank".to_string()));
        }

        let logo_uri = text(body, "/request/logoUri");
        if !Url::parse(logo_uri).is_ok_and(|u| matches!(u.scheme(), "http" | "https")) {
            return Err(("invalid_uri", format!("logoUri '{logo_uri}' is not a URL")));
        }

        if !all_in(body, "/request/authContextRefs", KNOWN_ACRS) {
            return Err(("invalid_acr", "unsupported authContextRefs".to_string()));
        }
        if !all_in(body, "/request/userClaims", KNOWN_CLAIMS) {
            return Err(("invalid_claim", "unsupported userClaims".to_string()));
        }
        if !all_in(body, "/request/grantTypes", &["authorization_code"]) {
            return Err(("invalid_grant_type", "unsupported grantTypes".to_string()));
        }
        if !all_in(body, "/request/clientAuthMethods", &["private_key_jwt"]) {
            return Err(("invalid_client_auth", "unsupported clientAuthMethods".to_string()));
        }

        Ok(client_id.to_string())
    }
}

impl Respond for ClientRegistryStub {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let response_time = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let outcome = serde_json::from_slice::<Value>(&request.body)
            .map_err(|e| ("invalid_request", e.to_string()))
            .and_then(|body| self.validate(&body));

        match outcome {
            Ok(client_id) => ResponseTemplate::new(200).set_body_json(json!({
                "responseTime": response_time,
                "response": {"clientId": client_id, "status": "ACTIVE", "errors": []}
            })),
            Err((code, message)) => ResponseTemplate::new(400).set_body_json(json!({
                "responseTime": response_time,
                "response": {"errors": [{"errorCode": code, "errorMessage": message}]}
            })),
        }
    }
}

fn text<'a>(body: &'a Value, pointer: &str) -> &'a str {
    body.pointer(pointer).and_then(Value::as_str).unwrap_or_default()
}

fn all_in(body: &Value, pointer: &str, allowed: &[&str]) -> bool {
    body.pointer(pointer)
        .and_then(Value::as_array)
        .is_some_and(|items| {
            !items.is_empty()
                && items
                    .iter()
                    .all(|item| item.as_str().is_some_and(|s| allowed.contains(&s)))
        })
}
