//! Request specification type

use std::time::Duration;

use url::Url;

use super::{Headers, HttpMethod, RequestBody};

/// Complete specification for an HTTP request.
///
/// A spec is assembled with consuming builder methods and is read-only
/// afterwards: the adapter only ever sees `&RequestSpec`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: HttpMethod,
    url: String,
    headers: Headers,
    body: RequestBody,
    timeout: Option<Duration>,
}

impl RequestSpec {
    /// Creates a request with the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::None,
            timeout: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Adds an `Authorization: Bearer <token>` header.
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Adds an `api_key` header.
    #[must_use]
    pub fn api_key(self, key: &str) -> Self {
        self.header("api_key", key)
    }

    /// Sets a structured JSON body.
    #[must_use]
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::json(value);
        self
    }

    /// Sets any body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout only when none was chosen explicitly.
    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.timeout.get_or_insert(timeout);
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the explicit headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body.
    #[must_use]
    pub const fn request_body(&self) -> &RequestBody {
        &self.body
    }

    /// Returns the timeout, if set.
    #[must_use]
    pub const fn timeout_value(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the content type that will be sent.
    ///
    /// An explicit `Content-Type` header wins over the type implied by the
    /// body, which is how unsupported-media-type requests are produced.
    #[must_use]
    pub fn effective_content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .or_else(|| self.body.content_type())
    }

    /// Validates the URL and returns the parsed version if valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let req = RequestSpec::post("https://api.example.com/orders")
            .bearer("token")
            .json(json!({"status": "OPEN"}))
            .timeout(Duration::from_secs(5));

        assert_eq!(req.method(), HttpMethod::Post);
        assert_eq!(req.url(), "https://api.example.com/orders");
        assert_eq!(req.headers().get("authorization"), Some("Bearer token"));
        assert_eq!(req.timeout_value(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_header_overrides_body_content_type() {
        let req = RequestSpec::post("https://api.example.com")
            .json(json!({"income": 2025}))
            .header("Content-Type", "text/plain");
        assert_eq!(req.effective_content_type(), Some("text/plain"));

        let req = RequestSpec::post("https://api.example.com").json(json!({}));
        assert_eq!(req.effective_content_type(), Some("application/json"));
    }

    #[test]
    fn test_default_timeout_does_not_override() {
        let req = RequestSpec::get("https://api.example.com")
            .timeout(Duration::from_millis(100))
            .with_default_timeout(Duration::from_secs(30));
        assert_eq!(req.timeout_value(), Some(Duration::from_millis(100)));

        let req = RequestSpec::get("https://api.example.com")
            .with_default_timeout(Duration::from_secs(30));
        assert_eq!(req.timeout_value(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_api_key_header() {
        let req = RequestSpec::put("https://api.example.com/test-orders/1").api_key("secret");
        assert_eq!(req.headers().get("api_key"), Some("secret"));
        assert!(req.parse_url().is_ok());
    }
}
