//! Contract Harness
//!
//! Command-line front end and the contract suites for the loan-decision and
//! order endpoints.

pub mod cli;
pub mod suites;

pub use suites::registry;
