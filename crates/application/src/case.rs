//! Test cases and suites.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use harness_domain::AssertionMode;

use crate::context::CaseContext;
use crate::error::CaseResult;

/// The future a case body returns.
pub type CaseFuture<'a> = Pin<Box<dyn Future<Output = CaseResult<()>> + Send + 'a>>;

type CaseBody = dyn for<'a> Fn(&'a mut CaseContext) -> CaseFuture<'a> + Send + Sync;

/// A single named test case.
///
/// ```ignore
/// async fn get_order(ctx: &mut CaseContext) -> CaseResult<()> {
///     let id = ctx.require_segment("order_id")?;
///     let url = ctx.endpoint(&format!("orders/{id}"))?;
///     let response = ctx.send(RequestSpec::get(url)).await?;
///     ctx.verify().status(&response, 200)
/// }
///
/// let case = TestCase::new("get order by id", |ctx| Box::pin(get_order(ctx)))
///     .requires("order_id");
/// ```
pub struct TestCase {
    name: String,
    requires: Vec<String>,
    provides: Vec<String>,
    mode: Option<AssertionMode>,
    body: Box<CaseBody>,
}

impl TestCase {
    /// Creates a case from its body.
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: for<'a> Fn(&'a mut CaseContext) -> CaseFuture<'a> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            requires: Vec::new(),
            provides: Vec::new(),
            mode: None,
            body: Box::new(body),
        }
    }

    /// Declares a fixture key this case reads.
    ///
    /// If the key is unset when the case is reached, the case fails with a
    /// missing precondition and sends nothing.
    #[must_use]
    pub fn requires(mut self, key: impl Into<String>) -> Self {
        self.requires.push(key.into());
        self
    }

    /// Declares a fixture key this case writes.
    ///
    /// Marks the case as setup for the report; finishing without writing
    /// the key fails the case.
    #[must_use]
    pub fn provides(mut self, key: impl Into<String>) -> Self {
        self.provides.push(key.into());
        self
    }

    /// Pins the assertion mode for this case.
    #[must_use]
    pub const fn mode(mut self, mode: AssertionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Shorthand for `CollectAll`.
    #[must_use]
    pub const fn soft(self) -> Self {
        self.mode(AssertionMode::CollectAll)
    }

    /// Returns the case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fixture keys this case reads.
    #[must_use]
    pub fn required_keys(&self) -> &[String] {
        &self.requires
    }

    /// Returns the fixture keys this case writes.
    #[must_use]
    pub fn provided_keys(&self) -> &[String] {
        &self.provides
    }

    /// Returns true if this case writes fixture values.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_setup(&self) -> bool {
        !self.provides.is_empty()
    }

    /// Returns the pinned mode, if any.
    #[must_use]
    pub const fn pinned_mode(&self) -> Option<AssertionMode> {
        self.mode
    }

    /// Runs the body.
    pub fn call<'a>(&self, ctx: &'a mut CaseContext) -> CaseFuture<'a> {
        (self.body)(ctx)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("provides", &self.provides)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// An ordered group of cases sharing one fixture.
#[derive(Debug)]
pub struct Suite {
    name: String,
    cases: Vec<TestCase>,
}

impl Suite {
    /// Create a new empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Appends a case (builder pattern).
    #[must_use]
    pub fn case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Returns the suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cases in declaration order.
    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Check if the suite is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Get the number of cases.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.cases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn pass(_ctx: &mut CaseContext) -> CaseResult<()> {
        Ok(())
    }

    fn noop(name: &str) -> TestCase {
        TestCase::new(name, |ctx| Box::pin(pass(ctx)))
    }

    #[test]
    fn test_case_builder() {
        let case = noop("create order").provides("order_id").soft();
        assert_eq!(case.name(), "create order");
        assert!(case.is_setup());
        assert_eq!(case.pinned_mode(), Some(AssertionMode::CollectAll));
        assert!(case.required_keys().is_empty());
    }

    #[test]
    fn test_suite_builder() {
        let suite = Suite::new("orders")
            .case(noop("create").provides("order_id"))
            .case(noop("get").requires("order_id"));

        assert_eq!(suite.name(), "orders");
        assert_eq!(suite.len(), 2);
        let names: Vec<_> = suite.cases().iter().map(TestCase::name).collect();
        assert_eq!(names, vec!["create", "get"]);
    }
}
