//! HTTP Client port

use async_trait::async_trait;
use harness_domain::{RequestSpec, ResponseSpec, TransportErrorKind};
use thiserror::Error;

/// Transport-level failures.
///
/// A non-2xx status is never one of these: it is a valid response to be
/// asserted on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying message.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// No response arrived within the timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    BodyRead(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps the error to its display category.
    #[must_use]
    pub const fn to_error_kind(&self) -> TransportErrorKind {
        match self {
            Self::InvalidUrl(_) => TransportErrorKind::InvalidUrl,
            Self::DnsError { .. } => TransportErrorKind::DnsError,
            Self::ConnectionRefused { .. } => TransportErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => TransportErrorKind::ConnectionFailed,
            Self::Timeout { .. } => TransportErrorKind::Timeout,
            Self::TooManyRedirects { .. } => TransportErrorKind::TooManyRedirects,
            Self::BodyRead(_) => TransportErrorKind::BodyRead,
            Self::Other(_) => TransportErrorKind::Unknown,
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a request and captures the response.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures (network unreachable,
    /// timeout, unreadable body). Every HTTP status is returned as `Ok`.
    async fn send(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            HttpClientError::Timeout { timeout_ms: 10 }.to_error_kind(),
            TransportErrorKind::Timeout
        );
        assert_eq!(
            HttpClientError::Other("boom".to_string()).to_error_kind(),
            TransportErrorKind::Unknown
        );
    }

    #[test]
    fn test_error_messages() {
        let err = HttpClientError::ConnectionRefused {
            host: "localhost".to_string(),
            port: 9,
        };
        assert_eq!(err.to_string(), "connection refused by localhost:9");
        assert_eq!(
            HttpClientError::Timeout { timeout_ms: 250 }.to_string(),
            "request timed out after 250ms"
        );
    }
}
