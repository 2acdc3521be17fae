//! Harness settings loading.
//!
//! Settings are layered: built-in defaults, then an optional file, then
//! `OIDC_PROBE_*` environment variables (`__` separates nested keys, e.g.
//! `OIDC_PROBE_CONTENT_TYPE__VALUE`).

use std::path::Path;

use config::{Config, ConfigError, Environment, File, Map};
use probe_domain::{DomainError, HarnessSettings, ResponseSchemas};
use serde_json::Value;

use crate::serialization::{SerializationError, read_json_file};

/// Prefix of the environment variables that override settings.
pub const ENV_PREFIX: &str = "OIDC_PROBE";

/// Environment variable naming the settings file used by the runner binary.
pub const CONFIG_PATH_VAR: &str = "OIDC_PROBE_CONFIG";

/// Errors raised while loading settings or schemas.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// The layered configuration could not be built or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The schema file could not be read or parsed.
    #[error("schema file error: {0}")]
    SchemaFile(#[from] SerializationError),

    /// The schema document or endpoint is unusable.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Loads settings from defaults, an optional file, and `OIDC_PROBE_*`
/// variables.
///
/// `vars` is the environment to read the last layer from; the runner passes
/// `std::env::vars()`. Entries without the prefix are ignored.
///
/// # Errors
///
/// Returns an error if `path` is given but missing or malformed, or if a
/// value cannot be converted to its setting type.
pub fn load_settings<I, K, V>(
    path: Option<&Path>,
    vars: I,
) -> Result<HarnessSettings, ConfigLoadError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: Map<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let mut builder = Config::builder().add_source(Config::try_from(&HarnessSettings::default())?);

    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "loading settings file");
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings: HarnessSettings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(Some(vars)),
        )
        .build()?
        .try_deserialize()?;

    // Fail early on an unusable host rather than in every scenario.
    settings.endpoint_url()?;
    Ok(settings)
}

/// Returns the response schemas for a run.
///
/// Uses the built-in envelope unless `schema_path` names a JSON file holding
/// a replacement base document.
///
/// # Errors
///
/// Returns an error if the schema file cannot be read or lacks a
/// `properties.response` object schema.
pub fn load_schemas(settings: &HarnessSettings) -> Result<ResponseSchemas, ConfigLoadError> {
    match &settings.schema_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading response schema");
            let base: Value = read_json_file(path)?;
            Ok(ResponseSchemas::from_base(base)?)
        }
        None => Ok(ResponseSchemas::default()),
    }
}
