//! Request and response payload shapes for the backend under test.

mod loan;
mod order;
mod payload;

pub use loan::{LoanApplication, LoanDecision, RISK_DECISIONS, RISK_LEVELS};
pub use order::{Order, OrderStatus};
pub use payload::Payload;
