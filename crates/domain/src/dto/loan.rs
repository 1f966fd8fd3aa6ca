//! Loan decision payloads.

use serde::{Deserialize, Serialize, Serializer};

/// Risk levels the decision endpoint may return.
pub const RISK_LEVELS: [&str; 4] = ["Low Risk", "Medium Risk", "High Risk", "Very High Risk"];

/// Decisions the decision endpoint may return.
pub const RISK_DECISIONS: [&str; 2] = ["positive", "negative"];

/// A loan application as sent to the decision endpoint.
///
/// Values are passed through untouched: negative income or a zero age are
/// legitimate inputs for observing server-side validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    /// Monthly income.
    #[serde(serialize_with = "whole_number")]
    pub income: f64,
    /// Outstanding debt.
    #[serde(serialize_with = "whole_number")]
    pub debt: f64,
    /// Applicant age in years.
    pub age: i64,
    /// Whether the applicant is employed.
    pub employed: bool,
    /// Requested amount.
    #[serde(serialize_with = "whole_number")]
    pub loan_amount: f64,
    /// Requested period in months.
    pub loan_period: i64,
}

impl LoanApplication {
    /// Creates an application from every field.
    #[must_use]
    pub const fn new(
        income: f64,
        debt: f64,
        age: i64,
        employed: bool,
        loan_amount: f64,
        loan_period: i64,
    ) -> Self {
        Self {
            income,
            debt,
            age,
            employed,
            loan_amount,
            loan_period,
        }
    }

    /// Creates an application for an employed applicant.
    #[must_use]
    pub const fn employed(
        income: f64,
        debt: f64,
        age: i64,
        loan_amount: f64,
        loan_period: i64,
    ) -> Self {
        Self::new(income, debt, age, true, loan_amount, loan_period)
    }
}

/// Writes integral amounts without a fractional part (`4000`, not `4000.0`).
#[allow(
    clippy::trivially_copy_pass_by_ref,
    clippy::cast_possible_truncation,
    clippy::float_cmp
)]
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // Beyond 2^53 not every integer is representable, so keep those as floats.
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// The decision endpoint's success body.
///
/// Unknown fields are ignored so the contract only pins what is asserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDecision {
    /// "positive" or "negative".
    pub risk_decision: String,
    /// One of [`RISK_LEVELS`].
    pub risk_level: String,
    /// Server-assigned application id.
    #[serde(default)]
    pub application_id: Option<String>,
}
