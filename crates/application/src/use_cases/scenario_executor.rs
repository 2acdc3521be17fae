//! Scenario Executor Use Case
//!
//! Owns the single request/response pair of one scenario: builds the
//! client-create body, sends it, and runs expectations against what came
//! back.

use std::sync::Arc;

use probe_domain::{
    Assertion, AssertionResult, CapturedResponse, ClientCreateRequest, ClientField, ClientValues,
    PreparedRequest, SchemaVariant,
};
use url::Url;
use uuid::Uuid;

use crate::error::{ScenarioError, ScenarioResult};
use crate::ports::{HttpClient, ResponseChecker};

/// Use case driving one scenario against `POST /client-mgmt/oidc-client`.
///
/// A fresh executor is created for every scenario and dropped (or
/// [`close`](Self::close)d) when it ends, so nothing leaks between scenarios.
///
/// # Example
///
/// ```ignore
/// let mut executor = ScenarioExecutor::new(client, checker, endpoint);
/// executor.prepare_valid(ClientValues::default())?;
/// executor.dispatch().await?;
/// executor.expect_status(200)?;
/// ```
#[derive(Debug)]
pub struct ScenarioExecutor<C: HttpClient, R: ResponseChecker> {
    id: Uuid,
    client: Arc<C>,
    checker: Arc<R>,
    endpoint: Url,
    request_timeout_ms: Option<u64>,
    request: Option<PreparedRequest>,
    response: Option<CapturedResponse>,
}

impl<C: HttpClient, R: ResponseChecker> ScenarioExecutor<C, R> {
    /// Creates an executor that posts to `endpoint`.
    pub fn new(client: Arc<C>, checker: Arc<R>, endpoint: Url) -> Self {
        let id = Uuid::now_v7();
        tracing::debug!(scenario = %id, %endpoint, "scenario executor opened");
        Self {
            id,
            client,
            checker,
            endpoint,
            request_timeout_ms: None,
            request: None,
            response: None,
        }
    }

    /// Sets the per-request timeout (builder pattern).
    #[must_use]
    pub const fn with_request_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Identifier of this scenario run.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The request built for this scenario, if any.
    #[must_use]
    pub const fn request(&self) -> Option<&PreparedRequest> {
        self.request.as_ref()
    }

    /// Builds the request for this scenario.
    ///
    /// Preparing again before dispatch replaces the pending request. Values
    /// are forwarded untouched; rejecting malformed input is the service's job.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::AlreadyDispatched` once a response was captured.
    pub fn prepare(&mut self, body: ClientCreateRequest) -> ScenarioResult<&PreparedRequest> {
        if self.response.is_some() {
            return Err(ScenarioError::AlreadyDispatched);
        }
        let request = PreparedRequest::new(self.endpoint.clone(), body)
            .with_timeout_ms(self.request_timeout_ms);
        tracing::debug!(
            scenario = %self.id,
            request = %request.id,
            client_id = request.body.client_id(),
            "client-create request prepared"
        );
        Ok(&*self.request.insert(request))
    }

    /// Builds a request from a full set of values.
    ///
    /// # Errors
    ///
    /// See [`prepare`](Self::prepare).
    pub fn prepare_valid(&mut self, values: ClientValues) -> ScenarioResult<&PreparedRequest> {
        self.prepare(values.into())
    }

    /// Builds a request from a full set of values plus redirect URIs.
    ///
    /// # Errors
    ///
    /// See [`prepare`](Self::prepare).
    pub fn prepare_with_redirect_uris(
        &mut self,
        values: ClientValues,
        redirect_uris: impl Into<String>,
    ) -> ScenarioResult<&PreparedRequest> {
        self.prepare(values.with_redirect_uris(redirect_uris).into())
    }

    /// Builds a request where only `field` carries the supplied value.
    ///
    /// # Errors
    ///
    /// See [`prepare`](Self::prepare).
    pub fn prepare_invalid(
        &mut self,
        field: ClientField,
        value: impl Into<String>,
    ) -> ScenarioResult<&PreparedRequest> {
        self.prepare(ClientValues::with_invalid(field, value).into())
    }

    /// Sends the prepared request and captures the response.
    ///
    /// # Errors
    ///
    /// Returns `NotPrepared` without a request, `AlreadyDispatched` on a second
    /// call, or `Http` if the round trip fails.
    pub async fn dispatch(&mut self) -> ScenarioResult<&CapturedResponse> {
        if self.response.is_some() {
            return Err(ScenarioError::AlreadyDispatched);
        }
        let request = self.request.as_ref().ok_or(ScenarioError::NotPrepared)?;

        let response = match self.client.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(scenario = %self.id, error = %e, "client-create request failed");
                return Err(e.into());
            }
        };

        tracing::info!(
            scenario = %self.id,
            status = response.status,
            elapsed_ms = response.elapsed_ms(),
            "client-create response received"
        );
        Ok(&*self.response.insert(response))
    }

    /// The captured response.
    ///
    /// # Errors
    ///
    /// Returns `NotDispatched` before [`dispatch`](Self::dispatch) succeeded.
    pub fn response(&self) -> ScenarioResult<&CapturedResponse> {
        self.response.as_ref().ok_or(ScenarioError::NotDispatched)
    }

    /// Runs an assertion against the captured response.
    ///
    /// # Errors
    ///
    /// Returns `NotDispatched` before dispatch, or `Expectation` if the
    /// assertion failed.
    pub fn check(&self, assertion: &Assertion) -> ScenarioResult<AssertionResult> {
        let response = self.response()?;
        let result = self.checker.check(assertion, response);
        if result.passed {
            tracing::debug!(scenario = %self.id, "{}", result.summary());
            Ok(result)
        } else {
            let message = result
                .error
                .clone()
                .unwrap_or_else(|| "expectation not met".to_string());
            tracing::warn!(scenario = %self.id, assertion = %assertion.description(), %message, "expectation failed");
            Err(ScenarioError::Expectation {
                assertion: assertion.description(),
                message,
            })
        }
    }

    /// Response time must be strictly below `max_ms`.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn expect_response_time_below(&self, max_ms: u64) -> ScenarioResult<AssertionResult> {
        self.check(&Assertion::ResponseTimeBelow { max_ms })
    }

    /// Status code must equal `expected`.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn expect_status(&self, expected: u16) -> ScenarioResult<AssertionResult> {
        self.check(&Assertion::StatusCode { expected })
    }

    /// Header `name` must equal `value`.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn expect_header(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> ScenarioResult<AssertionResult> {
        self.check(&Assertion::Header {
            name: name.into(),
            value: value.into(),
        })
    }

    /// Body must validate against the given schema variant.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn expect_schema(&self, variant: SchemaVariant) -> ScenarioResult<AssertionResult> {
        self.check(&Assertion::MatchesSchema { variant })
    }

    /// `response.clientId` must equal `expected`.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn expect_client_id(&self, expected: impl Into<String>) -> ScenarioResult<AssertionResult> {
        self.check(&Assertion::client_id(expected))
    }

    /// Releases the executor at scenario teardown.
    pub fn close(self) {
        tracing::debug!(
            scenario = %self.id,
            dispatched = self.response.is_some(),
            "scenario executor closed"
        );
    }
}
