//! What a case body sees while it runs.

use std::sync::Arc;

use harness_domain::{
    AssertionMode, AssertionRecord, Fixture, RequestBody, RequestSpec, ResponseSpec, Settings,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CaseError, CaseResult};
use crate::ports::{HttpClient, HttpClientError};
use crate::verifier::Verifier;

/// Per-case handle onto the HTTP client, the suite's fixture and the
/// case's verifier.
///
/// The runner moves the suite fixture into the context before the case runs
/// and takes it back afterwards, so a case can only ever touch its own
/// suite's state.
pub struct CaseContext {
    client: Arc<dyn HttpClient>,
    settings: Arc<Settings>,
    fixture: Fixture,
    verifier: Verifier,
    requests_sent: usize,
}

impl CaseContext {
    /// Creates a context.
    #[must_use]
    pub fn new(
        client: Arc<dyn HttpClient>,
        settings: Arc<Settings>,
        fixture: Fixture,
        mode: AssertionMode,
    ) -> Self {
        Self {
            client,
            settings,
            fixture,
            verifier: Verifier::new(mode),
            requests_sent: 0,
        }
    }

    /// Returns the run settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Joins a path onto the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::InvalidPayload` if the URL cannot be built.
    pub fn endpoint(&self, path: &str) -> CaseResult<String> {
        Ok(self.settings.endpoint(path)?)
    }

    /// Sends a request and captures the response.
    ///
    /// The configured timeout applies unless the request sets its own. The
    /// timeout is enforced here as well as by the adapter, so every client
    /// implementation fails the same way when it elapses.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Transport` when no response arrives. Any status
    /// code, including 4xx and 5xx, is a successful send.
    pub async fn send(&mut self, request: RequestSpec) -> CaseResult<ResponseSpec> {
        let request = request.with_default_timeout(self.settings.timeout());
        let timeout = request.timeout_value().unwrap_or_else(|| self.settings.timeout());
        self.requests_sent += 1;

        debug!(method = %request.method(), url = request.url(), "sending request");
        if let Some(body) = body_preview(request.request_body()) {
            debug!(content_type = request.effective_content_type(), %body, "request body");
        }

        let result = tokio::time::timeout(timeout, self.client.send(&request)).await;
        let response = match result {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(url = request.url(), error = %e, "request failed");
                return Err(CaseError::Transport(e));
            }
            Err(_) => {
                let e = HttpClientError::Timeout {
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                };
                warn!(url = request.url(), error = %e, "request failed");
                return Err(CaseError::Transport(e));
            }
        };

        debug!(
            status = response.status(),
            json = response.is_json(),
            elapsed_ms = u64::try_from(response.duration().as_millis()).unwrap_or(u64::MAX),
            body = %response.text(),
            "received response"
        );
        Ok(response)
    }

    /// Returns the verifier for this case.
    pub fn verify(&mut self) -> &mut Verifier {
        &mut self.verifier
    }

    /// Writes a fixture value for later cases.
    pub fn provide(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fixture.set(key, value);
    }

    /// Reads a fixture value a previous case wrote.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::MissingPrecondition` if the value is not set.
    pub fn require(&self, key: &str) -> CaseResult<&Value> {
        self.fixture
            .get(key)
            .ok_or_else(|| CaseError::MissingPrecondition {
                key: key.to_string(),
            })
    }

    /// Reads a fixture value as a URL path segment.
    ///
    /// Strings are used verbatim, anything else is rendered as JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::MissingPrecondition` if the value is not set.
    pub fn require_segment(&self, key: &str) -> CaseResult<String> {
        Ok(match self.require(key)? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Returns how many requests this case has sent.
    #[must_use]
    pub const fn requests_sent(&self) -> usize {
        self.requests_sent
    }

    /// Splits the context back into the suite fixture and the case's records.
    #[must_use]
    pub fn into_parts(self) -> (Fixture, Vec<AssertionRecord>) {
        (self.fixture, self.verifier.into_records())
    }
}

fn body_preview(body: &RequestBody) -> Option<String> {
    match body {
        RequestBody::None => None,
        RequestBody::Json { value } => Some(value.to_string()),
        RequestBody::Raw { content, .. } => Some(content.clone()),
    }
}
