//! Case error types

use harness_domain::{AssertionRecord, DomainError, FailureReason};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Errors that end a case early.
///
/// Case bodies return `CaseResult<()>` and use `?` freely; the runner turns
/// whatever comes back into a `FailureReason`.
#[derive(Debug, Clone, Error)]
pub enum CaseError {
    /// A fail-fast assertion failed.
    #[error("assertion failed: {0}")]
    Assertion(AssertionRecord),

    /// A fixture value the case reads was not set.
    #[error("missing precondition: fixture '{key}' is not set")]
    MissingPrecondition {
        /// The fixture key.
        key: String,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// The case could not build its request.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<DomainError> for CaseError {
    fn from(error: DomainError) -> Self {
        Self::InvalidPayload(error.to_string())
    }
}

impl CaseError {
    /// Converts this error to a failure reason, given the assertions the
    /// case had failed by the time it stopped.
    #[must_use]
    pub fn into_reason(self, failed: Vec<AssertionRecord>) -> FailureReason {
        match self {
            Self::Assertion(_) => FailureReason::Assertions { failures: failed },
            Self::MissingPrecondition { key } => FailureReason::MissingPrecondition { key },
            Self::Transport(e) => FailureReason::Transport {
                error_kind: e.to_error_kind(),
                message: e.to_string(),
            },
            Self::InvalidPayload(message) => FailureReason::InvalidPayload { message },
        }
    }
}

/// Result type alias for case bodies.
pub type CaseResult<T> = Result<T, CaseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use harness_domain::{Expectation, TransportErrorKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_transport_reason() {
        let reason = CaseError::from(HttpClientError::Timeout { timeout_ms: 5 }).into_reason(vec![]);
        assert_eq!(
            reason,
            FailureReason::Transport {
                error_kind: TransportErrorKind::Timeout,
                message: "request timed out after 5ms".to_string(),
            }
        );
    }

    #[test]
    fn test_assertion_reason_carries_failures() {
        let record = AssertionRecord::evaluate("status", Expectation::equals(200), Some(json!(400)));
        let reason = CaseError::Assertion(record.clone()).into_reason(vec![record.clone()]);
        assert_eq!(
            reason,
            FailureReason::Assertions {
                failures: vec![record]
            }
        );
    }

    #[test]
    fn test_domain_error_is_payload_error() {
        let err = CaseError::from(DomainError::InvalidPayload("not an object".to_string()));
        assert!(matches!(err, CaseError::InvalidPayload(_)));
    }
}
