//! Assertion bookkeeping.
//!
//! This module provides the value types behind the assertion layer: the
//! mode a case evaluates its assertions in, what an assertion expects, and
//! the record it leaves behind.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// How a case treats a failing assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AssertionMode {
    /// Abort the case at the first failure (hard assertions).
    #[default]
    FailFast,
    /// Evaluate everything and report all failures together (soft assertions).
    CollectAll,
}

impl AssertionMode {
    /// Returns the mode name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FailFast => "fail-fast",
            Self::CollectAll => "collect-all",
        }
    }
}

impl fmt::Display for AssertionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssertionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "fail-fast" | "hard" => Ok(Self::FailFast),
            "collect-all" | "soft" => Ok(Self::CollectAll),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

/// What an assertion expects of the actual value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Expectation {
    /// Exactly this value.
    Equals(Value),
    /// Any of these values.
    OneOf(Vec<Value>),
    /// Present and not null.
    Defined,
    /// A JSON string.
    IsString,
    /// Present, not null, not false, not an empty string.
    Truthy,
    /// A string matching this regular expression.
    Matches(String),
}

impl Expectation {
    /// Builds an `Equals` expectation.
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::Equals(value.into())
    }

    /// Builds a `OneOf` expectation.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Builds a `Matches` expectation after checking the pattern compiles.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPattern` if the pattern is not a valid
    /// regular expression.
    pub fn matches(pattern: impl Into<String>) -> DomainResult<Self> {
        let pattern = pattern.into();
        Regex::new(&pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::Matches(pattern))
    }

    /// Checks an actual value; `None` means the value was absent.
    #[must_use]
    pub fn check(&self, actual: Option<&Value>) -> bool {
        match (self, actual) {
            (Self::Equals(expected), Some(actual)) => actual == expected,
            (Self::OneOf(allowed), Some(actual)) => allowed.contains(actual),
            (Self::Defined, Some(actual)) => !actual.is_null(),
            (Self::IsString, Some(actual)) => actual.is_string(),
            (Self::Truthy, Some(actual)) => is_truthy(actual),
            (Self::Matches(pattern), Some(Value::String(s))) => {
                Regex::new(pattern).is_ok_and(|re| re.is_match(s))
            }
            _ => false,
        }
    }

    /// Get a human-readable description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Equals(v) => format!("= {v}"),
            Self::OneOf(values) => {
                let values: Vec<_> = values.iter().map(ToString::to_string).collect();
                format!("in [{}]", values.join(", "))
            }
            Self::Defined => "defined".to_string(),
            Self::IsString => "a string".to_string(),
            Self::Truthy => "truthy".to_string(),
            Self::Matches(pattern) => format!("matches /{pattern}/"),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => true,
    }
}

/// Result of evaluating one assertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionRecord {
    /// What was checked (e.g. "status", "riskDecision").
    pub description: String,
    /// What was expected.
    pub expected: Expectation,
    /// What was observed; `None` when the value was absent.
    pub actual: Option<Value>,
    /// Whether the assertion passed.
    pub passed: bool,
}

impl AssertionRecord {
    /// Evaluates an expectation against an actual value.
    #[must_use]
    pub fn evaluate(
        description: impl Into<String>,
        expected: Expectation,
        actual: Option<Value>,
    ) -> Self {
        let passed = expected.check(actual.as_ref());
        Self {
            description: description.into(),
            expected,
            actual,
            passed,
        }
    }

    /// Renders the actual value for display.
    #[must_use]
    pub fn actual_display(&self) -> String {
        self.actual
            .as_ref()
            .map_or_else(|| "<absent>".to_string(), ToString::to_string)
    }
}

impl fmt::Display for AssertionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.description,
            self.expected.description(),
            self.actual_display()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("soft".parse::<AssertionMode>().unwrap(), AssertionMode::CollectAll);
        assert_eq!("fail-fast".parse::<AssertionMode>().unwrap(), AssertionMode::FailFast);
        assert!("lenient".parse::<AssertionMode>().is_err());
    }

    #[test]
    fn test_membership() {
        let exp = Expectation::one_of([405, 400]);
        assert!(exp.check(Some(&json!(400))));
        assert!(!exp.check(Some(&json!(200))));
        assert_eq!(exp.description(), "in [405, 400]");
    }

    #[test]
    fn test_absent_value_never_passes() {
        for exp in [
            Expectation::Defined,
            Expectation::IsString,
            Expectation::Truthy,
            Expectation::equals(Value::Null),
        ] {
            assert!(!exp.check(None), "{exp:?} passed on absent value");
        }
    }

    #[test]
    fn test_truthiness() {
        assert!(Expectation::Truthy.check(Some(&json!("deleted"))));
        assert!(!Expectation::Truthy.check(Some(&json!(""))));
        assert!(!Expectation::Truthy.check(Some(&json!(false))));
        assert!(!Expectation::Truthy.check(Some(&json!(0))));
        assert!(Expectation::Truthy.check(Some(&json!({}))));
    }

    #[test]
    fn test_matches() {
        let exp = Expectation::matches("^[0-9a-f-]{36}$").unwrap();
        assert!(exp.check(Some(&json!("0191b6c4-7a4e-7c3a-9d3e-2f1a5b6c7d8e"))));
        assert!(!exp.check(Some(&json!(42))));
        assert!(Expectation::matches("(").is_err());
    }

    #[test]
    fn test_record_display() {
        let record = AssertionRecord::evaluate("status", Expectation::equals(200), Some(json!(400)));
        assert!(!record.passed);
        assert_eq!(record.to_string(), "status: expected = 200, got 400");

        let record = AssertionRecord::evaluate("body.id", Expectation::Defined, None);
        assert_eq!(record.to_string(), "body.id: expected defined, got <absent>");
    }
}
