//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Every status code the server returns comes back as a `ResponseSpec`;
//! only transport failures become errors.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use harness_application::ports::{HttpClient, HttpClientError};
use harness_domain::{HttpMethod, RequestBody, RequestSpec, ResponseSpec, Settings};
use reqwest::{Client, Method};
use tracing::trace;

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps a `reqwest::Client`, which pools connections and is cheap to share
/// between concurrently running suites.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    default_timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a client configured from the run settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &Settings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(settings.timeout())
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            default_timeout: settings.timeout(),
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Builds the reqwest request from a `RequestSpec`.
    ///
    /// Explicit headers are sent verbatim. The body's own content type is
    /// added only when no `Content-Type` header was set, so a case can send a
    /// JSON body labelled `text/plain`.
    fn build(&self, request: &RequestSpec) -> Result<reqwest::RequestBuilder, HttpClientError> {
        let url = request
            .parse_url()
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url())))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method()), url);
        if let Some(timeout) = request.timeout_value() {
            builder = builder.timeout(timeout);
        }

        for header in request.headers().iter() {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }
        let body = request.request_body();
        if !request.headers().contains("content-type")
            && let Some(content_type) = body.content_type()
        {
            builder = builder.header("Content-Type", content_type);
        }

        if !matches!(body, RequestBody::None) {
            builder = builder.body(body.encode());
        }
        Ok(builder)
    }

    /// Maps reqwest errors to domain `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string();

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::BodyRead(error_chain(error));
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error with its sources; reqwest keeps the useful part
/// ("Connection refused") in the source chain.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Flattens response headers; repeated names are joined with `, `.
fn capture_headers(map: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::with_capacity(map.keys_len());
    for (name, value) in map {
        let value = value.to_str().unwrap_or("<binary>");
        headers
            .entry(name.to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    headers
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let timeout_ms = millis(request.timeout_value().unwrap_or(self.default_timeout));
        let builder = self.build(request)?;

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers = capture_headers(response.headers());

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?
            .to_vec();
        let duration = start.elapsed();

        trace!(status, bytes = body.len(), elapsed_ms = millis(duration), "response read");
        Ok(ResponseSpec::new(status, headers, body, duration))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Put),
            Method::PUT
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new(&Settings::default()).is_ok());
    }

    #[test]
    fn test_header_content_type_wins() {
        let client = ReqwestHttpClient::new(&Settings::default()).unwrap();
        let spec = RequestSpec::post("https://example.com/api")
            .header("Content-Type", "text/plain")
            .json(json!({"income": 1}));
        let request = client.build(&spec).unwrap().build().unwrap();

        let values: Vec<_> = request.headers().get_all("content-type").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "text/plain");
    }

    #[test]
    fn test_json_body_gets_json_content_type() {
        let client = ReqwestHttpClient::new(&Settings::default()).unwrap();
        let spec = RequestSpec::post("https://example.com/api").json(json!({"a": 1}));
        let request = client.build(&spec).unwrap().build().unwrap();

        assert_eq!(request.headers()["content-type"], "application/json");
        let body = request.body().and_then(reqwest::Body::as_bytes).unwrap();
        assert_eq!(body, br#"{"a":1}"#);
    }

    #[test]
    fn test_repeated_response_headers_are_joined() {
        let mut map = reqwest::header::HeaderMap::new();
        map.append("set-cookie", "session=abc".parse().unwrap());
        map.append("set-cookie", "theme=dark".parse().unwrap());
        map.insert("content-type", "application/json".parse().unwrap());

        let headers = capture_headers(&map);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["set-cookie"], "session=abc, theme=dark");
        assert_eq!(headers["content-type"], "application/json");
    }

    #[test]
    fn test_invalid_url() {
        let client = ReqwestHttpClient::new(&Settings::default()).unwrap();
        let result = client.build(&RequestSpec::get("not a url"));
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }
}
