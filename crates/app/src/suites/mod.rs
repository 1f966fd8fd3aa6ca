//! The shipped contract suites.
//!
//! Each suite is declared as data: an ordered list of named cases whose
//! bodies build a request, send it and assert on the response.

mod loan_decision;
mod orders;
mod test_orders;

use harness_application::SuiteRegistry;

/// Returns every shipped suite in run order.
#[must_use]
pub fn registry() -> SuiteRegistry {
    let mut registry = SuiteRegistry::new();
    registry
        .register(loan_decision::decisions())
        .register(loan_decision::validation())
        .register(orders::suite())
        .register(test_orders::suite());
    registry
}
