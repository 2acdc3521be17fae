//! Cucumber world, hooks and steps for `POST /client-mgmt/oidc-client`.
//!
//! Every scenario tagged `@endpoint=/client-mgmt/oidc-client` (directly, on
//! its rule, or on its feature) gets a fresh [`ClientCreateExecutor`] in the
//! `before` hook; the `after` hook releases it. Scenarios without the tag have
//! no executor and any step they run fails with `NoExecutor`.

use std::path::Path;
use std::sync::Arc;

use cucumber::{World, cli, gherkin, given, then, when};
use probe_application::{ScenarioError, ScenarioExecutor, ScenarioResult};
use probe_application::ports::HttpClientError;
use probe_domain::{
    ClientField, ClientValues, DomainError, HarnessSettings, ResponseSchemas, SchemaVariant,
};
use probe_infrastructure::{ReqwestHttpClient, SchemaCompileError, TestRunner};
use url::Url;

/// Executor type used against the live service.
pub type ClientCreateExecutor = ScenarioExecutor<ReqwestHttpClient, TestRunner>;

/// Errors raised while assembling the shared scenario context.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The endpoint URL could not be resolved.
    #[error(transparent)]
    Endpoint(#[from] DomainError),

    /// The HTTP client could not be built.
    #[error("http client: {0}")]
    Client(#[from] HttpClientError),

    /// A response schema did not compile.
    #[error(transparent)]
    Schema(#[from] SchemaCompileError),
}

/// Everything a scenario needs that outlives it.
///
/// Built once per run; the HTTP client and the compiled schemas are shared
/// by every executor the hooks create.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    settings: Arc<HarnessSettings>,
    endpoint: Url,
    client: Arc<ReqwestHttpClient>,
    checker: Arc<TestRunner>,
}

impl ScenarioContext {
    /// Resolves the endpoint, builds the HTTP client and compiles the schemas.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three steps fails.
    pub fn new(settings: HarnessSettings, schemas: &ResponseSchemas) -> Result<Self, SetupError> {
        let endpoint = settings.endpoint_url()?;
        let client = ReqwestHttpClient::new()?;
        let checker = TestRunner::new(schemas)?;

        Ok(Self {
            settings: Arc::new(settings),
            endpoint,
            client: Arc::new(client),
            checker: Arc::new(checker),
        })
    }

    /// Settings of this run.
    #[must_use]
    pub fn settings(&self) -> &HarnessSettings {
        &self.settings
    }

    /// Creates an executor scoped to one scenario.
    #[must_use]
    pub fn executor(&self) -> ClientCreateExecutor {
        ScenarioExecutor::new(
            Arc::clone(&self.client),
            Arc::clone(&self.checker),
            self.endpoint.clone(),
        )
        .with_request_timeout_ms(self.settings.request_timeout_ms)
    }

    /// Returns true if the scenario belongs to this endpoint.
    fn applies_to(
        &self,
        feature: &gherkin::Feature,
        rule: Option<&gherkin::Rule>,
        scenario: &gherkin::Scenario,
    ) -> bool {
        let tag = self.settings.endpoint_tag();
        has_tag(&scenario.tags, &tag)
            || rule.is_some_and(|r| has_tag(&r.tags, &tag))
            || has_tag(&feature.tags, &tag)
    }
}

fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t.trim_start_matches('@') == tag)
}

/// Per-scenario state.
#[derive(Debug, Default, World)]
pub struct ClientCreateWorld {
    executor: Option<ClientCreateExecutor>,
    settings: HarnessSettings,
}

impl ClientCreateWorld {
    fn open(&mut self, context: &ScenarioContext, scenario: &str) {
        let executor = context.executor();
        tracing::debug!(executor = %executor.id(), scenario, "scenario opened");
        self.settings = context.settings().clone();
        self.executor = Some(executor);
    }

    fn close(&mut self) {
        if let Some(executor) = self.executor.take() {
            executor.close();
        }
    }

    fn executor(&self) -> ScenarioResult<&ClientCreateExecutor> {
        self.executor.as_ref().ok_or_else(|| self.missing_executor())
    }

    fn executor_mut(&mut self) -> ScenarioResult<&mut ClientCreateExecutor> {
        let tag = self.settings.endpoint_tag();
        self.executor
            .as_mut()
            .ok_or(ScenarioError::NoExecutor { tag })
    }

    fn missing_executor(&self) -> ScenarioError {
        ScenarioError::NoExecutor {
            tag: self.settings.endpoint_tag(),
        }
    }
}

/// Runs the feature files at `features` against the service in `context`.
///
/// Scenarios run one at a time. Skipped steps count as failures. Panics with
/// a summary once the run is over if anything failed.
pub async fn run_features(context: ScenarioContext, features: impl AsRef<Path>) {
    let features = features.as_ref().to_path_buf();
    tracing::info!(
        features = %features.display(),
        endpoint = %context.endpoint,
        "running client-create features"
    );

    ClientCreateWorld::cucumber()
        .max_concurrent_scenarios(1)
        .before(move |feature, rule, scenario, world| {
            if context.applies_to(feature, rule, scenario) {
                world.open(&context, &scenario.name);
            }
            Box::pin(async {})
        })
        .after(|_feature, _rule, _scenario, _finished, world| {
            if let Some(world) = world {
                world.close();
            }
            Box::pin(async {})
        })
        .fail_on_skipped()
        .with_cli(cli::Opts::<_, _, _, cli::Empty>::default())
        .run_and_exit(features)
        .await;
}

#[given(regex = r"^The user wants to add the new client to the Open ID Connect \(OIDC\)$")]
fn wants_to_add_client(world: &mut ClientCreateWorld) -> ScenarioResult<()> {
    world.executor().map(drop)
}

#[when(
    regex = r#"^User sends POST request with given "([^"]*)" as requestTime, "([^"]*)" as clientId, "([^"]*)" as clientName, "([^"]*)" as relyingPartyId, "([^"]*)" as logoUri, empty object as publicKey, "([^"]*)" as authContextRefs, "([^"]*)" as userClaims, "([^"]*)" as grantTypes, "([^"]*)" as clientAuthMethods$"#
)]
#[allow(clippy::too_many_arguments)]
fn sends_valid_request(
    world: &mut ClientCreateWorld,
    request_time: String,
    client_id: String,
    client_name: String,
    relying_party_id: String,
    logo_uri: String,
    auth_context_ref: String,
    user_claim: String,
    grant_type: String,
    client_auth_method: String,
) -> ScenarioResult<()> {
    let values = ClientValues {
        request_time,
        client_id,
        client_name,
        relying_party_id,
        logo_uri,
        auth_context_refs: vec![auth_context_ref],
        user_claims: vec![user_claim],
        grant_types: vec![grant_type],
        client_auth_methods: vec![client_auth_method],
        redirect_uris: None,
    };
    world.executor_mut()?.prepare_valid(values).map(drop)
}

#[when(
    regex = r#"^User sends POST request with given "([^"]*)" as requestTime, "([^"]*)" as clientId, "([^"]*)" as clientName, "([^"]*)" as relyingPartyId, "([^"]*)" as logoUri, empty object as publicKey, "([^"]*)" as authContextRefs, "([^"]*)" as userClaims, "([^"]*)" as grantTypes, "([^"]*)" as clientAuthMethods, "([^"]*)" as redirectUris$"#
)]
#[allow(clippy::too_many_arguments)]
fn sends_valid_request_with_redirect_uris(
    world: &mut ClientCreateWorld,
    request_time: String,
    client_id: String,
    client_name: String,
    relying_party_id: String,
    logo_uri: String,
    auth_context_ref: String,
    user_claim: String,
    grant_type: String,
    client_auth_method: String,
    redirect_uris: String,
) -> ScenarioResult<()> {
    let values = ClientValues {
        request_time,
        client_id,
        client_name,
        relying_party_id,
        logo_uri,
        auth_context_refs: vec![auth_context_ref],
        user_claims: vec![user_claim],
        grant_types: vec![grant_type],
        client_auth_methods: vec![client_auth_method],
        redirect_uris: None,
    };
    world
        .executor_mut()?
        .prepare_with_redirect_uris(values, redirect_uris)
        .map(drop)
}

#[when(
    regex = r#"^User sends POST request with given "([^"]*)" as invalid (requestTime|authContextRefs|userClaims|grantTypes|clientAuthMethods|clientName|relyingPartyId|logoUri|clientId)$"#
)]
fn sends_invalid_field(
    world: &mut ClientCreateWorld,
    value: String,
    field: ClientField,
) -> ScenarioResult<()> {
    world.executor_mut()?.prepare_invalid(field, value).map(drop)
}

#[then(regex = r"^User receives a response from the POST /client-mgmt/oidc-client endpoint$")]
async fn receives_response(world: &mut ClientCreateWorld) -> ScenarioResult<()> {
    world.executor_mut()?.dispatch().await.map(drop)
}

#[then(
    regex = r"^The POST /client-mgmt/oidc-client endpoint response should be returned in a timely manner \d+ms$"
)]
fn responds_in_time(world: &mut ClientCreateWorld) -> ScenarioResult<()> {
    let max_ms = world.settings.response_time_ms;
    world
        .executor()?
        .expect_response_time_below(max_ms)
        .map(drop)
}

#[then(regex = r"^The POST /client-mgmt/oidc-client endpoint response should have status (\d+)$")]
fn has_status(world: &mut ClientCreateWorld, status: u16) -> ScenarioResult<()> {
    world.executor()?.expect_status(status).map(drop)
}

#[then(
    regex = r"^The POST /client-mgmt/oidc-client endpoint response should have content-type: application/json header$"
)]
fn has_json_content_type(world: &mut ClientCreateWorld) -> ScenarioResult<()> {
    let expected = world.settings.content_type.clone();
    world
        .executor()?
        .expect_header(expected.key, expected.value)
        .map(drop)
}

#[then(regex = r"^The POST /client-mgmt/oidc-client endpoint response should match json schema$")]
fn matches_success_schema(world: &mut ClientCreateWorld) -> ScenarioResult<()> {
    world
        .executor()?
        .expect_schema(SchemaVariant::Success)
        .map(drop)
}

#[then(
    regex = r"^The POST /client-mgmt/oidc-client endpoint response should match json schema with error code and error message$"
)]
fn matches_error_schema(world: &mut ClientCreateWorld) -> ScenarioResult<()> {
    world
        .executor()?
        .expect_schema(SchemaVariant::Error)
        .map(drop)
}

#[then(
    regex = r#"^The POST /client-mgmt/oidc-client endpoint response should contain "([^"]*)" as clientId$"#
)]
fn contains_client_id(world: &mut ClientCreateWorld, client_id: String) -> ScenarioResult<()> {
    world.executor()?.expect_client_id(client_id).map(drop)
}
