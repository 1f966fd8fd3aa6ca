//! Test doubles for the HTTP port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use harness_domain::{RequestSpec, ResponseSpec};

use crate::ports::{HttpClient, HttpClientError};

type Responder = dyn Fn(&RequestSpec) -> Result<ResponseSpec, HttpClientError> + Send + Sync;

/// Mock HTTP client for testing.
pub struct MockHttpClient {
    responder: Box<Responder>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<RequestSpec>>>,
}

impl MockHttpClient {
    /// Answers every request with the same status and body.
    pub fn status(status: u16, body: &str) -> Self {
        let body = body.as_bytes().to_vec();
        Self::respond_with(move |_| Ok(response(status, body.clone())))
    }

    /// Fails every request with the same transport error.
    pub fn error(err: HttpClientError) -> Self {
        Self::respond_with(move |_| Err(err.clone()))
    }

    /// Answers with a closure.
    pub fn respond_with<F>(responder: F) -> Self
    where
        F: Fn(&RequestSpec) -> Result<ResponseSpec, HttpClientError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sleeps before answering.
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared handle onto every request received.
    pub fn requests(&self) -> Arc<Mutex<Vec<RequestSpec>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(request)
    }
}

/// Builds a JSON response.
pub fn response(status: u16, body: Vec<u8>) -> ResponseSpec {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    ResponseSpec::new(status, headers, body, Duration::from_millis(5))
}
