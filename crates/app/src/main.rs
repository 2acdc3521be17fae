//! `oidc-probe [FEATURES_PATH]`
//!
//! Runs the client-create feature files against the configured service.
//! Settings come from the file named by `OIDC_PROBE_CONFIG` (if set) and
//! `OIDC_PROBE_*` environment variables.

use std::path::PathBuf;

use anyhow::Context as _;
use oidc_probe::{ScenarioContext, run_features};
use probe_infrastructure::{CONFIG_PATH_VAR, init_tracing, load_schemas, load_settings};

const DEFAULT_FEATURES_PATH: &str = "features";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config_path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    let settings = load_settings(config_path.as_deref(), std::env::vars())
        .context("failed to load settings")?;
    let schemas = load_schemas(&settings).context("failed to load response schema")?;

    let features = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_FEATURES_PATH), PathBuf::from);

    tracing::info!(
        base_host = %settings.base_host,
        response_time_ms = settings.response_time_ms,
        "oidc-probe starting"
    );

    let context = ScenarioContext::new(settings, &schemas).context("failed to prepare scenarios")?;
    run_features(context, features).await;

    Ok(())
}
