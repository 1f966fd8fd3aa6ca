//! Harness Domain - Core types
//!
//! This crate defines the domain model for the Contract Harness: request and
//! response specs, payload DTOs, assertion records, case states, fixtures
//! and reports. All types here are pure Rust with no I/O dependencies.

pub mod contract;
pub mod dto;
pub mod error;
pub mod fixture;
pub mod report;
pub mod request;
pub mod response;
pub mod settings;
pub mod state;
pub mod testing;

pub use contract::ApiStatus;
pub use dto::{LoanApplication, LoanDecision, Order, OrderStatus, Payload};
pub use error::{DomainError, DomainResult};
pub use fixture::Fixture;
pub use report::{CaseReport, RunReport, SuiteReport};
pub use request::{HttpMethod, RequestBody, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use settings::Settings;
pub use state::{CaseState, FailureReason, TransportErrorKind};
pub use testing::{AssertionMode, AssertionRecord, Expectation};
