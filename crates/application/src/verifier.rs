//! Assertion evaluation with fail-fast or collect-all semantics.

use harness_domain::{ApiStatus, AssertionMode, AssertionRecord, Expectation, ResponseSpec};
use serde_json::Value;
use tracing::debug;

use crate::error::{CaseError, CaseResult};

/// Evaluates assertions for one case and keeps the record of each.
///
/// Every check returns `CaseResult<()>`. In `FailFast` mode a failing check
/// returns `Err`, so `?` aborts the case there. In `CollectAll` mode checks
/// always return `Ok` and failures are read back from the records when the
/// case ends.
#[derive(Debug, Clone)]
pub struct Verifier {
    mode: AssertionMode,
    records: Vec<AssertionRecord>,
}

impl Verifier {
    /// Creates a verifier for the given mode.
    #[must_use]
    pub const fn new(mode: AssertionMode) -> Self {
        Self {
            mode,
            records: Vec::new(),
        }
    }

    /// Returns the mode.
    #[must_use]
    pub const fn mode(&self) -> AssertionMode {
        self.mode
    }

    /// Evaluates and records one assertion.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Assertion` when the assertion fails in
    /// `FailFast` mode.
    pub fn check(
        &mut self,
        description: impl Into<String>,
        expected: Expectation,
        actual: Option<Value>,
    ) -> CaseResult<()> {
        self.push(AssertionRecord::evaluate(description, expected, actual))
    }

    /// Asserts the exact status code.
    ///
    /// # Errors
    ///
    /// See [`Verifier::check`].
    pub fn status(&mut self, response: &ResponseSpec, expected: u16) -> CaseResult<()> {
        self.check(
            "status",
            Expectation::equals(expected),
            Some(Value::from(response.status())),
        )
    }

    /// Asserts the response has the given contract outcome.
    ///
    /// # Errors
    ///
    /// See [`Verifier::check`].
    pub fn api_status(&mut self, response: &ResponseSpec, expected: ApiStatus) -> CaseResult<()> {
        self.check(
            format!("status is {expected}"),
            Expectation::equals(expected.code()),
            Some(Value::from(response.status())),
        )
    }

    /// Asserts the status code is one of several acceptable codes.
    ///
    /// # Errors
    ///
    /// See [`Verifier::check`].
    pub fn status_one_of(&mut self, response: &ResponseSpec, allowed: &[u16]) -> CaseResult<()> {
        self.check(
            "status",
            Expectation::one_of(allowed.iter().copied()),
            Some(Value::from(response.status())),
        )
    }

    /// Decodes the body as JSON and records whether that worked.
    ///
    /// In `CollectAll` mode an undecodable body yields `Value::Null`, so
    /// later field checks fail individually rather than stopping the case.
    ///
    /// # Errors
    ///
    /// See [`Verifier::check`].
    pub fn json_body(&mut self, response: &ResponseSpec) -> CaseResult<Value> {
        match response.json_value() {
            Ok(value) => {
                self.check("body is JSON", Expectation::Defined, Some(Value::Bool(true)))?;
                Ok(value)
            }
            Err(e) => {
                self.push(AssertionRecord {
                    description: format!("body is JSON ({e})"),
                    expected: Expectation::Defined,
                    actual: Some(Value::String(preview(&response.text()))),
                    passed: false,
                })?;
                Ok(Value::Null)
            }
        }
    }

    /// Asserts on a field of a JSON body.
    ///
    /// `field` is either a top-level key (`"riskDecision"`) or a JSON
    /// pointer (`"/data/id"`).
    ///
    /// # Errors
    ///
    /// See [`Verifier::check`].
    pub fn field(&mut self, body: &Value, field: &str, expected: Expectation) -> CaseResult<()> {
        let actual = if field.starts_with('/') {
            body.pointer(field)
        } else {
            body.get(field)
        };
        self.check(field, expected, actual.cloned())
    }

    /// Asserts the raw body text is non-empty.
    ///
    /// # Errors
    ///
    /// See [`Verifier::check`].
    pub fn body_not_empty(&mut self, response: &ResponseSpec) -> CaseResult<()> {
        self.check(
            "body",
            Expectation::Truthy,
            Some(Value::String(response.text())),
        )
    }

    /// Returns every record so far.
    #[must_use]
    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    /// Returns the failed records so far.
    #[must_use]
    pub fn failures(&self) -> Vec<AssertionRecord> {
        self.records.iter().filter(|r| !r.passed).cloned().collect()
    }

    /// Returns true if any assertion failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.records.iter().any(|r| !r.passed)
    }

    /// Consumes the verifier, returning every record.
    #[must_use]
    pub fn into_records(self) -> Vec<AssertionRecord> {
        self.records
    }

    fn push(&mut self, record: AssertionRecord) -> CaseResult<()> {
        debug!(passed = record.passed, "{record}");
        if !record.passed && self.mode == AssertionMode::FailFast {
            self.records.push(record.clone());
            return Err(CaseError::Assertion(record));
        }
        self.records.push(record);
        Ok(())
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > 100 {
        let head: String = body.chars().take(100).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(
            status,
            HashMap::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let mut verifier = Verifier::new(AssertionMode::FailFast);
        let resp = response(400, "");

        let result = verifier.status(&resp, 200);
        assert!(matches!(result, Err(CaseError::Assertion(_))));
        assert_eq!(verifier.records().len(), 1);
        assert!(verifier.has_failures());
    }

    #[test]
    fn test_collect_all_records_every_failure() {
        let mut verifier = Verifier::new(AssertionMode::CollectAll);
        let resp = response(200, r#"{"riskDecision":"maybe","riskLevel":"Low Risk"}"#);

        verifier.status(&resp, 400).unwrap();
        let body = verifier.json_body(&resp).unwrap();
        verifier
            .field(&body, "riskDecision", Expectation::one_of(["positive", "negative"]))
            .unwrap();
        verifier
            .field(&body, "riskLevel", Expectation::one_of(["Low Risk", "High Risk"]))
            .unwrap();

        assert_eq!(verifier.records().len(), 4);
        let failed: Vec<_> = verifier
            .failures()
            .into_iter()
            .map(|r| r.description)
            .collect();
        assert_eq!(failed, vec!["status", "riskDecision"]);
    }

    #[test]
    fn test_status_membership() {
        let mut verifier = Verifier::new(AssertionMode::FailFast);
        assert!(verifier.status_one_of(&response(405, ""), &[405, 400]).is_ok());
        assert!(verifier.status_one_of(&response(200, ""), &[405, 400]).is_err());
    }

    #[test]
    fn test_api_status() {
        let mut verifier = Verifier::new(AssertionMode::CollectAll);
        verifier
            .api_status(&response(400, ""), ApiStatus::ValidationError)
            .unwrap();
        verifier
            .api_status(&response(200, ""), ApiStatus::UnsupportedMediaType)
            .unwrap();

        let records = verifier.into_records();
        assert!(records[0].passed);
        assert_eq!(records[0].description, "status is 400 Bad Request");
        assert_eq!(
            records[1].to_string(),
            "status is 415 Unsupported Media Type: expected = 415, got 200"
        );
    }

    #[test]
    fn test_undecodable_body_fails() {
        let mut verifier = Verifier::new(AssertionMode::CollectAll);
        let body = verifier.json_body(&response(400, "Bad Request")).unwrap();
        assert_eq!(body, Value::Null);
        assert!(verifier.has_failures());

        let mut verifier = Verifier::new(AssertionMode::FailFast);
        assert!(verifier.json_body(&response(400, "Bad Request")).is_err());
    }

    #[test]
    fn test_field_by_pointer_and_missing_field() {
        let mut verifier = Verifier::new(AssertionMode::CollectAll);
        let body = json!({"data": {"id": 5}});
        verifier.field(&body, "/data/id", Expectation::equals(5)).unwrap();
        verifier.field(&body, "id", Expectation::Defined).unwrap();

        let records = verifier.into_records();
        assert!(records[0].passed);
        assert!(!records[1].passed);
        assert_eq!(records[1].actual, None);
    }

    #[test]
    fn test_field_matches_pattern() {
        let mut verifier = Verifier::new(AssertionMode::CollectAll);
        let pattern = Expectation::matches(r"^[A-Za-z0-9][A-Za-z0-9-]*$").unwrap();
        verifier
            .field(&json!({"applicationId": "app-000017"}), "applicationId", pattern.clone())
            .unwrap();
        verifier
            .field(&json!({"applicationId": "has spaces"}), "applicationId", pattern.clone())
            .unwrap();
        verifier
            .field(&json!({"applicationId": 17}), "applicationId", pattern)
            .unwrap();

        let passed: Vec<_> = verifier.into_records().iter().map(|r| r.passed).collect();
        assert_eq!(passed, vec![true, false, false]);
    }

    #[test]
    fn test_body_not_empty() {
        let mut verifier = Verifier::new(AssertionMode::FailFast);
        assert!(verifier.body_not_empty(&response(200, "deleted")).is_ok());
        assert!(verifier.body_not_empty(&response(200, "")).is_err());
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(150);
        assert_eq!(preview(&long).len(), 103);
        assert_eq!(preview("short"), "short");
    }
}
