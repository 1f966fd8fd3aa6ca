//! Registry of the suites a run can choose from.

use std::sync::Arc;

use crate::case::Suite;
use crate::runner::Selection;

/// One line of `harness list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteListing {
    /// Suite name.
    pub name: String,
    /// Case names in declaration order.
    pub cases: Vec<String>,
}

/// Ordered collection of registered suites.
#[derive(Debug, Default, Clone)]
pub struct SuiteRegistry {
    suites: Vec<Arc<Suite>>,
}

impl SuiteRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a suite. Later registrations run later.
    pub fn register(&mut self, suite: Suite) -> &mut Self {
        self.suites.push(Arc::new(suite));
        self
    }

    /// Returns the registered suites in order.
    #[must_use]
    pub fn suites(&self) -> &[Arc<Suite>] {
        &self.suites
    }

    /// Looks up a suite by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Suite>> {
        self.suites.iter().find(|s| s.name() == name)
    }

    /// Lists the suites and cases a selection would run.
    #[must_use]
    pub fn list(&self, selection: &Selection) -> Vec<SuiteListing> {
        self.suites
            .iter()
            .filter(|s| selection.includes_suite(s))
            .map(|suite| SuiteListing {
                name: suite.name().to_string(),
                cases: suite
                    .cases()
                    .iter()
                    .filter(|c| selection.includes_case(c))
                    .map(|c| c.name().to_string())
                    .collect(),
            })
            .collect()
    }

    /// Returns the number of registered suites.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::TestCase;
    use crate::context::CaseContext;
    use crate::error::CaseResult;
    use pretty_assertions::assert_eq;

    async fn pass(_ctx: &mut CaseContext) -> CaseResult<()> {
        Ok(())
    }

    fn registry() -> SuiteRegistry {
        let mut registry = SuiteRegistry::new();
        registry
            .register(
                Suite::new("loan-decision")
                    .case(TestCase::new("valid application", |ctx| Box::pin(pass(ctx))))
                    .case(TestCase::new("wrong content type", |ctx| Box::pin(pass(ctx)))),
            )
            .register(Suite::new("orders").case(TestCase::new("create", |ctx| Box::pin(pass(ctx)))));
        registry
    }

    #[test]
    fn test_register_keeps_order() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.suites()[1].name(), "orders");
        assert!(registry.get("orders").is_some());
        assert!(registry.get("order").is_none());
    }

    #[test]
    fn test_list_applies_selection() {
        let selection = Selection {
            suite: None,
            case: Some("CONTENT".to_string()),
        };
        let listing = registry().list(&selection);
        assert_eq!(
            listing,
            vec![
                SuiteListing {
                    name: "loan-decision".to_string(),
                    cases: vec!["wrong content type".to_string()],
                },
                SuiteListing {
                    name: "orders".to_string(),
                    cases: vec![],
                },
            ]
        );
    }
}
