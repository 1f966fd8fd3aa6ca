//! Run results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{CaseState, FailureReason};
use crate::testing::AssertionRecord;

/// Outcome of one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Terminal state.
    pub state: CaseState,
    /// Whether the case writes fixture values other cases read.
    pub setup: bool,
    /// Every assertion evaluated, in order.
    pub records: Vec<AssertionRecord>,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.state.is_passed()
    }

    /// Returns true if a setup case failed, which makes later dependent
    /// failures likely symptoms rather than causes.
    #[must_use]
    pub const fn is_setup_failure(&self) -> bool {
        self.setup && self.state.is_failed()
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<&FailureReason> {
        self.state.reason()
    }
}

/// Results from running one suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name.
    pub name: String,
    /// Case outcomes in execution order.
    pub cases: Vec<CaseReport>,
    /// Total number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Failed cases whose assertions describe the API.
    pub api_failures: usize,
    /// Failed cases the harness could not carry out.
    pub harness_failures: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Create new suite results.
    #[must_use]
    pub fn new(name: impl Into<String>, cases: Vec<CaseReport>, duration_ms: u64) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.passed()).count();
        let failed = total - passed;
        let api_failures = cases
            .iter()
            .filter_map(CaseReport::reason)
            .filter(|r| r.is_api_failure())
            .count();

        Self {
            name: name.into(),
            cases,
            total,
            passed,
            failed,
            api_failures,
            harness_failures: failed - api_failures,
            duration_ms,
        }
    }

    /// Check if all cases passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Results from a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Suite outcomes in declaration order.
    pub suites: Vec<SuiteReport>,
    /// Wall-clock time in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Create a new run report.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, suites: Vec<SuiteReport>, duration_ms: u64) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            started_at,
            suites,
            duration_ms,
        }
    }

    /// Total number of cases.
    #[must_use]
    pub fn total(&self) -> usize {
        self.suites.iter().map(|s| s.total).sum()
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.suites.iter().map(|s| s.passed).sum()
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.suites.iter().map(|s| s.failed).sum()
    }

    /// Number of failed cases that point at the API.
    #[must_use]
    pub fn api_failures(&self) -> usize {
        self.suites.iter().map(|s| s.api_failures).sum()
    }

    /// Number of failed cases the harness could not carry out.
    #[must_use]
    pub fn harness_failures(&self) -> usize {
        self.suites.iter().map(|s| s.harness_failures).sum()
    }

    /// Check if every case passed; the process exit status follows this.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.suites.iter().all(SuiteReport::all_passed)
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            100.0
        } else {
            (self.passed() as f64 / total as f64) * 100.0
        }
    }
}
