//! Client-create request fields

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the request fields that a scenario may replace with an invalid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientField {
    /// Top-level `requestTime`.
    RequestTime,
    /// `request.authContextRefs`.
    AuthContextRefs,
    /// `request.userClaims`.
    UserClaims,
    /// `request.grantTypes`.
    GrantTypes,
    /// `request.clientAuthMethods`.
    ClientAuthMethods,
    /// `request.clientName`.
    ClientName,
    /// `request.relyingPartyId`.
    RelyingPartyId,
    /// `request.logoUri`.
    LogoUri,
    /// `request.clientId`.
    ClientId,
}

impl ClientField {
    /// Every substitutable field, in the order the scenarios exercise them.
    pub const ALL: [Self; 9] = [
        Self::RequestTime,
        Self::AuthContextRefs,
        Self::UserClaims,
        Self::GrantTypes,
        Self::ClientAuthMethods,
        Self::ClientName,
        Self::RelyingPartyId,
        Self::LogoUri,
        Self::ClientId,
    ];

    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequestTime => "requestTime",
            Self::AuthContextRefs => "authContextRefs",
            Self::UserClaims => "userClaims",
            Self::GrantTypes => "grantTypes",
            Self::ClientAuthMethods => "clientAuthMethods",
            Self::ClientName => "clientName",
            Self::RelyingPartyId => "relyingPartyId",
            Self::LogoUri => "logoUri",
            Self::ClientId => "clientId",
        }
    }
}

impl fmt::Display for ClientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        for field in ClientField::ALL {
            assert_eq!(field.as_str().parse::<ClientField>(), Ok(field));
        }
    }

    #[test]
    fn test_parse_unknown_field() {
        let result = "redirectUris".parse::<ClientField>();
        assert_eq!(
            result,
            Err(DomainError::UnknownField("redirectUris".to_string()))
        );
    }
}
