//! Case execution state.
//!
//! Every case moves `Unrun -> Running -> {Passed, Failed}`. A case whose
//! preconditions are missing skips `Running` and goes straight to `Failed`.

use serde::{Deserialize, Serialize};

use crate::testing::AssertionRecord;

/// Represents the current state of a test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CaseState {
    /// Not started yet.
    #[default]
    Unrun,
    /// Currently executing.
    Running,
    /// Finished with every assertion passing.
    Passed,
    /// Finished unsuccessfully.
    Failed {
        /// Why the case failed.
        reason: FailureReason,
    },
}

impl CaseState {
    /// Creates a Failed state.
    #[must_use]
    pub const fn failed(reason: FailureReason) -> Self {
        Self::Failed { reason }
    }

    /// Returns true if the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns true if the case failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns true once the case can no longer change state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Passed | Self::Failed { .. })
    }

    /// Returns the failure reason if in Failed state.
    #[must_use]
    pub const fn reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// Short label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unrun => "UNRUN",
            Self::Running => "RUNNING",
            Self::Passed => "PASS",
            Self::Failed { .. } => "FAIL",
        }
    }
}

/// Why a case failed.
///
/// Only `Assertions` reflects the API's behaviour. The other reasons are
/// harness-side and must not be read as API regressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// One or more assertions failed.
    Assertions {
        /// The failed assertions, in evaluation order.
        failures: Vec<AssertionRecord>,
    },
    /// A fixture value this case reads was never written.
    MissingPrecondition {
        /// The fixture key.
        key: String,
    },
    /// The case declared it writes a fixture value but did not.
    FixtureNotProduced {
        /// The fixture key.
        key: String,
    },
    /// The request never produced a response.
    Transport {
        /// Error category.
        error_kind: TransportErrorKind,
        /// Human-readable message.
        message: String,
    },
    /// The case could not build its request payload.
    InvalidPayload {
        /// Human-readable message.
        message: String,
    },
    /// The case never finished (its task panicked or was cancelled).
    Aborted {
        /// Human-readable message.
        message: String,
    },
}

impl FailureReason {
    /// Returns true when the failure describes the API rather than the harness.
    #[must_use]
    pub const fn is_api_failure(&self) -> bool {
        matches!(self, Self::Assertions { .. })
    }

    /// Short category for display.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Assertions { .. } => "assertion failure",
            Self::MissingPrecondition { .. } => "missing precondition",
            Self::FixtureNotProduced { .. } => "fixture not produced",
            Self::Transport { .. } => "transport error",
            Self::InvalidPayload { .. } => "invalid payload",
            Self::Aborted { .. } => "aborted",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assertions { failures } => {
                write!(f, "{} assertion(s) failed", failures.len())
            }
            Self::MissingPrecondition { key } => {
                write!(f, "missing precondition: fixture '{key}' is not set")
            }
            Self::FixtureNotProduced { key } => {
                write!(f, "fixture '{key}' was not produced")
            }
            Self::Transport {
                error_kind,
                message,
            } => write!(f, "{}: {message}", error_kind.title()),
            Self::InvalidPayload { message } => write!(f, "invalid payload: {message}"),
            Self::Aborted { message } => write!(f, "aborted: {message}"),
        }
    }
}

/// Categories of transport errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    /// Invalid URL format.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Request timed out.
    Timeout,

    /// Too many redirects.
    TooManyRedirects,

    /// The response body could not be read.
    BodyRead,

    /// Unknown or unexpected error.
    Unknown,
}

impl TransportErrorKind {
    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Timeout => "Request Timeout",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::BodyRead => "Body Read Failed",
            Self::Unknown => "Unknown Error",
        }
    }
}
