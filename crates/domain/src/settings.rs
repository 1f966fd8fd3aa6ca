//! Harness settings.
//!
//! Where the backend lives and which credentials the suites present.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::testing::AssertionMode;

/// Default backend under test.
pub const DEFAULT_BASE_URL: &str = "https://backend.tallinn-learning.ee";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Settings shared by every suite of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL every endpoint path is joined onto.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Token for `Authorization: Bearer` endpoints.
    pub bearer_token: String,
    /// Key for `api_key` endpoints.
    pub api_key: String,
    /// A key the server must reject.
    pub invalid_api_key: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Run independent suites concurrently.
    pub parallel: bool,
    /// Mode for cases that do not pick one themselves.
    pub default_mode: AssertionMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            bearer_token: String::new(),
            api_key: String::new(),
            invalid_api_key: "invalid-api-key".to_string(),
            user_agent: format!("contract-harness/{}", env!("CARGO_PKG_VERSION")),
            parallel: false,
            default_mode: AssertionMode::FailFast,
        }
    }
}

impl Settings {
    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Joins an endpoint path onto the base URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base URL or the joined result
    /// is not a valid URL.
    pub fn endpoint(&self, path: &str) -> DomainResult<String> {
        let mut base = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map(String::from)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {path}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.default_mode, AssertionMode::FailFast);
    }

    #[test]
    fn test_endpoint_join() {
        let settings = Settings::default();
        assert_eq!(
            settings.endpoint("/api/loan-calc/decision").unwrap(),
            "https://backend.tallinn-learning.ee/api/loan-calc/decision"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let settings = Settings {
            base_url: "http://127.0.0.1:8080/prefix".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.endpoint("orders/5").unwrap(),
            "http://127.0.0.1:8080/prefix/orders/5"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = Settings {
            base_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.endpoint("orders"),
            Err(DomainError::InvalidUrl(_))
        ));
    }
}
