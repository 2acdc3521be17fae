//! Response schema variants.
//!
//! The service answers every client-create call with the same envelope. A
//! successful call must carry no errors; a rejected call only has to keep the
//! envelope shape. The two variants differ in that one constraint; the
//! client id echo is asserted separately. Both variants are derived once
//! from a single base document and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{DomainError, DomainResult};

/// Which schema a response body is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// `response.errors` empty.
    Success,
    /// Envelope shape only; `response.errors` may hold anything the schema allows.
    Error,
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// The pair of schema documents used by the assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchemas {
    success: Value,
    error: Value,
}

impl ResponseSchemas {
    /// Derives both variants from a base envelope schema.
    ///
    /// The base document is the error variant as-is. The success variant caps
    /// `response.errors` at zero items.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSchema` if the base has no
    /// `properties.response` object schema.
    pub fn from_base(base: Value) -> DomainResult<Self> {
        let mut success = base.clone();

        let response = success
            .pointer_mut("/properties/response")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                DomainError::InvalidSchema("missing properties.response object".to_string())
            })?;

        let properties = response
            .entry("properties")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .ok_or_else(|| {
                DomainError::InvalidSchema(
                    "properties.response.properties must be an object".to_string(),
                )
            })?;

        match properties
            .entry("errors")
            .or_insert_with(|| json!({ "type": "array" }))
        {
            Value::Object(errors) => {
                errors.insert("maxItems".to_string(), json!(0));
            }
            _ => {
                return Err(DomainError::InvalidSchema(
                    "properties.response.properties.errors must be an object".to_string(),
                ));
            }
        }

        Ok(Self {
            success,
            error: base,
        })
    }

    /// Returns the schema document for a variant.
    #[must_use]
    pub const fn get(&self, variant: SchemaVariant) -> &Value {
        match variant {
            SchemaVariant::Success => &self.success,
            SchemaVariant::Error => &self.error,
        }
    }
}

impl Default for ResponseSchemas {
    fn default() -> Self {
        let error = default_envelope_schema();
        let mut success = error.clone();
        success["properties"]["response"]["properties"]["errors"]["maxItems"] = json!(0);
        Self { success, error }
    }
}

/// Built-in envelope schema for `POST /client-mgmt/oidc-client` responses.
#[must_use]
pub fn default_envelope_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["response"],
        "properties": {
            "responseTime": { "type": "string" },
            "response": {
                "type": "object",
                "required": ["errors"],
                "properties": {
                    "clientId": { "type": "string" },
                    "status": { "type": "string" },
                    "errors": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["errorCode", "errorMessage"],
                            "properties": {
                                "errorCode": { "type": "string" },
                                "errorMessage": { "type": "string" }
                            }
                        }
                    }
                }
            }
        }
    })
}
