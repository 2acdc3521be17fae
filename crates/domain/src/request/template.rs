//! Client-create request template
//!
//! Scenario parameters are collected into [`ClientValues`] and rendered into
//! the JSON body shape expected by `POST /client-mgmt/oidc-client`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ClientField;

/// Known-good `requestTime`.
pub const DEFAULT_REQUEST_TIME: &str = "2011-10-05T14:48:00.000Z";
/// Known-good `clientId`.
pub const DEFAULT_CLIENT_ID: &str = "e-health-service";
/// Known-good `clientName`.
pub const DEFAULT_CLIENT_NAME: &str = "Health Service";
/// Known-good `relyingPartyId`.
pub const DEFAULT_RELYING_PARTY_ID: &str = "bharath-gov";
/// Known-good `logoUri`.
pub const DEFAULT_LOGO_URI: &str = "http://example.com";
/// Known-good authentication context reference.
pub const DEFAULT_AUTH_CONTEXT_REF: &str = "idbb:acr:generated-code";
/// Known-good user claim.
pub const DEFAULT_USER_CLAIM: &str = "name";
/// Known-good grant type.
pub const DEFAULT_GRANT_TYPE: &str = "authorization_code";
/// Known-good client authentication method.
pub const DEFAULT_CLIENT_AUTH_METHOD: &str = "private_key_jwt";

/// Field values for one client-create request.
///
/// `Default` yields the known-good values every invalid-field scenario starts
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientValues {
    /// ISO-8601 request timestamp.
    pub request_time: String,
    /// Client identifier.
    pub client_id: String,
    /// Display name.
    pub client_name: String,
    /// Relying party identifier.
    pub relying_party_id: String,
    /// Logo location.
    pub logo_uri: String,
    /// Authentication context references.
    pub auth_context_refs: Vec<String>,
    /// Requested user claims.
    pub user_claims: Vec<String>,
    /// Allowed grant types.
    pub grant_types: Vec<String>,
    /// Allowed client authentication methods.
    pub client_auth_methods: Vec<String>,
    /// Redirect URIs, forwarded verbatim when present.
    pub redirect_uris: Option<String>,
}

impl Default for ClientValues {
    fn default() -> Self {
        Self {
            request_time: DEFAULT_REQUEST_TIME.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            relying_party_id: DEFAULT_RELYING_PARTY_ID.to_string(),
            logo_uri: DEFAULT_LOGO_URI.to_string(),
            auth_context_refs: vec![DEFAULT_AUTH_CONTEXT_REF.to_string()],
            user_claims: vec![DEFAULT_USER_CLAIM.to_string()],
            grant_types: vec![DEFAULT_GRANT_TYPE.to_string()],
            client_auth_methods: vec![DEFAULT_CLIENT_AUTH_METHOD.to_string()],
            redirect_uris: None,
        }
    }
}

impl ClientValues {
    /// Baseline values for a scenario that breaks `field`.
    ///
    /// The `relyingPartyId`, `logoUri` and `clientId` scenarios keep
    /// `clientName` equal to the client id.
    #[must_use]
    pub fn baseline_for(field: ClientField) -> Self {
        let mut values = Self::default();
        if matches!(
            field,
            ClientField::RelyingPartyId | ClientField::LogoUri | ClientField::ClientId
        ) {
            values.client_name = DEFAULT_CLIENT_ID.to_string();
        }
        values
    }

    /// Known-good values with exactly one field replaced by `value`.
    ///
    /// Sequence fields receive `value` as their only element.
    #[must_use]
    pub fn with_invalid(field: ClientField, value: impl Into<String>) -> Self {
        Self::baseline_for(field).with_field(field, value)
    }

    /// Replaces a single field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, field: ClientField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            ClientField::RequestTime => self.request_time = value,
            ClientField::ClientId => self.client_id = value,
            ClientField::ClientName => self.client_name = value,
            ClientField::RelyingPartyId => self.relying_party_id = value,
            ClientField::LogoUri => self.logo_uri = value,
            ClientField::AuthContextRefs => self.auth_context_refs = vec![value],
            ClientField::UserClaims => self.user_claims = vec![value],
            ClientField::GrantTypes => self.grant_types = vec![value],
            ClientField::ClientAuthMethods => self.client_auth_methods = vec![value],
        }
        self
    }

    /// Sets the redirect URIs (builder pattern).
    #[must_use]
    pub fn with_redirect_uris(mut self, redirect_uris: impl Into<String>) -> Self {
        self.redirect_uris = Some(redirect_uris.into());
        self
    }
}

/// JSON body of `POST /client-mgmt/oidc-client`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreateRequest {
    /// ISO-8601 request timestamp.
    pub request_time: String,
    /// Client registration details.
    pub request: ClientDetails,
}

/// The nested `request` object of a client-create body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    /// Client identifier.
    pub client_id: String,
    /// Display name.
    pub client_name: String,
    /// Relying party identifier.
    pub relying_party_id: String,
    /// Logo location.
    pub logo_uri: String,
    /// Key material; always an empty object in these scenarios.
    #[serde(default)]
    pub public_key: Map<String, Value>,
    /// Authentication context references.
    pub auth_context_refs: Vec<String>,
    /// Requested user claims.
    pub user_claims: Vec<String>,
    /// Allowed grant types.
    pub grant_types: Vec<String>,
    /// Allowed client authentication methods.
    pub client_auth_methods: Vec<String>,
    /// Redirect URIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uris: Option<String>,
}

impl From<ClientValues> for ClientCreateRequest {
    fn from(values: ClientValues) -> Self {
        Self {
            request_time: values.request_time,
            request: ClientDetails {
                client_id: values.client_id,
                client_name: values.client_name,
                relying_party_id: values.relying_party_id,
                logo_uri: values.logo_uri,
                public_key: Map::new(),
                auth_context_refs: values.auth_context_refs,
                user_claims: values.user_claims,
                grant_types: values.grant_types,
                client_auth_methods: values.client_auth_methods,
                redirect_uris: values.redirect_uris,
            },
        }
    }
}

impl Default for ClientCreateRequest {
    fn default() -> Self {
        ClientValues::default().into()
    }
}

impl ClientCreateRequest {
    /// Returns the submitted client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.request.client_id
    }
}
