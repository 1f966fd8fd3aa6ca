//! Contract Harness Application Layer
//!
//! Test cases, suites and the runner that drives them against an
//! [`HttpClient`](ports::HttpClient).

pub mod case;
pub mod context;
pub mod error;
pub mod ports;
pub mod registry;
pub mod runner;
pub mod verifier;

#[cfg(test)]
mod testing;

pub use case::{CaseFuture, Suite, TestCase};
pub use context::CaseContext;
pub use error::{CaseError, CaseResult};
pub use ports::{HttpClient, HttpClientError};
pub use registry::{SuiteListing, SuiteRegistry};
pub use runner::{Selection, SuiteRunner};
pub use verifier::Verifier;
