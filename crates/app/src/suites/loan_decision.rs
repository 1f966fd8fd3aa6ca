//! Loan decision endpoint.
//!
//! `loan-decision` pins the accept/reject rules with hard assertions.
//! `loan-validation` probes the edges of input validation in collect-all
//! mode so one run surfaces every drifted rule at once.

use harness_application::{CaseContext, CaseResult, Suite, TestCase};
use harness_domain::dto::{RISK_DECISIONS, RISK_LEVELS};
use harness_domain::{ApiStatus, Expectation, LoanApplication, Payload, RequestSpec, ResponseSpec};
use serde_json::json;

const APPLICATION_ID_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9-]*$";

const DECISION_PATH: &str = "/api/loan-calc/decision";

type Edit = fn(Payload) -> Payload;

async fn post_decision(ctx: &mut CaseContext, application: Payload) -> CaseResult<ResponseSpec> {
    let url = ctx.endpoint(DECISION_PATH)?;
    ctx.send(RequestSpec::post(url).json(application.into_value()))
        .await
}

/// Expects 200 with a well-formed decision, optionally a specific one.
async fn decided(
    ctx: &mut CaseContext,
    application: LoanApplication,
    expected: Option<&'static str>,
) -> CaseResult<()> {
    let response = post_decision(ctx, Payload::from_dto(&application)?).await?;
    ctx.verify().api_status(&response, ApiStatus::Ok)?;

    let body = ctx.verify().json_body(&response)?;
    let decision = match expected {
        Some(decision) => Expectation::equals(decision),
        None => Expectation::one_of(RISK_DECISIONS),
    };
    ctx.verify().field(&body, "riskDecision", decision)?;
    ctx.verify()
        .field(&body, "riskLevel", Expectation::one_of(RISK_LEVELS))
}

/// Sends a possibly edited application and expects one status.
async fn answered(
    ctx: &mut CaseContext,
    application: LoanApplication,
    edit: Edit,
    expected: ApiStatus,
) -> CaseResult<()> {
    let payload = edit(Payload::from_dto(&application)?);
    let response = post_decision(ctx, payload).await?;
    ctx.verify().api_status(&response, expected)
}

async fn plain_text_body(ctx: &mut CaseContext) -> CaseResult<()> {
    let application = LoanApplication::new(2025.0, 0.0, 30, true, 9999.0, 1);
    let url = ctx.endpoint(DECISION_PATH)?;
    let request = RequestSpec::post(url)
        .header("Content-Type", "text/plain")
        .header("Accept", "*/*")
        .json(Payload::from_dto(&application)?.into_value());

    let response = ctx.send(request).await?;
    ctx.verify()
        .api_status(&response, ApiStatus::UnsupportedMediaType)
}

async fn application_id_is_string(ctx: &mut CaseContext) -> CaseResult<()> {
    let application = LoanApplication::employed(600.0, 0.0, 20, 1500.0, 12);
    let response = post_decision(ctx, Payload::from_dto(&application)?).await?;
    ctx.verify().api_status(&response, ApiStatus::Ok)?;
    let body = ctx.verify().json_body(&response)?;
    ctx.verify()
        .field(&body, "applicationId", Expectation::IsString)?;
    ctx.verify().field(
        &body,
        "applicationId",
        Expectation::matches(APPLICATION_ID_PATTERN)?,
    )
}

async fn wrong_method(ctx: &mut CaseContext) -> CaseResult<()> {
    let url = ctx.endpoint(DECISION_PATH)?;
    let response = ctx.send(RequestSpec::get(url)).await?;
    ctx.verify().status_one_of(
        &response,
        &[
            ApiStatus::MethodNotAllowed.code(),
            ApiStatus::ValidationError.code(),
        ],
    )
}

async fn unrelated_body(ctx: &mut CaseContext) -> CaseResult<()> {
    let payload = Payload::new()
        .set("wrongField", 123)
        .set("anotherField", "test");
    let response = post_decision(ctx, payload).await?;
    ctx.verify()
        .api_status(&response, ApiStatus::ValidationError)
}

fn decision_case(
    name: &str,
    application: LoanApplication,
    expected: Option<&'static str>,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        Box::pin(decided(ctx, application.clone(), expected))
    })
}

fn status_case(name: &str, application: LoanApplication, expected: ApiStatus) -> TestCase {
    edited_case(name, application, |p| p, expected)
}

fn edited_case(
    name: &str,
    application: LoanApplication,
    edit: Edit,
    expected: ApiStatus,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        Box::pin(answered(ctx, application.clone(), edit, expected))
    })
}

/// Accept/reject rules of the decision endpoint.
pub fn decisions() -> Suite {
    Suite::new("loan-decision")
        .case(decision_case(
            "approves low-risk loan with high income and low amount",
            LoanApplication::new(4000.0, 0.0, 21, true, 500.0, 13),
            Some("positive"),
        ))
        .case(decision_case(
            "rejects high-risk loan despite high income",
            LoanApplication::new(50000.0, 3000.0, 88, true, 12000.0, 36),
            Some("negative"),
        ))
        .case(status_case(
            "negative income returns 400",
            LoanApplication::new(-666.0, 0.0, 30, true, 300.0, 30),
            ApiStatus::ValidationError,
        ))
        .case(status_case(
            "zero income returns 400",
            LoanApplication::new(0.0, 0.0, 30, true, 30000.0, 12),
            ApiStatus::ValidationError,
        ))
        .case(TestCase::new("non-JSON content type returns 415", |ctx| {
            Box::pin(plain_text_body(ctx))
        }))
        .case(decision_case(
            "approves unemployed applicant with low risk profile",
            LoanApplication::new(700.0, 0.0, 30, false, 999.0, 6),
            Some("positive"),
        ))
        .case(status_case(
            "age 0 returns 400",
            LoanApplication::new(2000.0, 0.0, 0, true, 1000.0, 12),
            ApiStatus::ValidationError,
        ))
        .case(status_case(
            "age exactly 100 is accepted",
            LoanApplication::new(2000.0, 0.0, 100, true, 1000.0, 12),
            ApiStatus::Ok,
        ))
        .case(edited_case(
            "string loanAmount returns 400",
            LoanApplication::new(2000.0, 0.0, 30, true, 1000.0, 12),
            |p| p.set("loanAmount", "not-a-number"),
            ApiStatus::ValidationError,
        ))
        .case(edited_case(
            "missing loanAmount and loanPeriod returns 400",
            LoanApplication::new(2000.0, 0.0, 30, true, 1000.0, 12),
            |p| p.remove("loanAmount").remove("loanPeriod"),
            ApiStatus::ValidationError,
        ))
        .case(
            TestCase::new("unexpected field is ignored", |ctx| {
                Box::pin(extra_field(ctx))
            }),
        )
}

async fn extra_field(ctx: &mut CaseContext) -> CaseResult<()> {
    let application = LoanApplication::new(2000.0, 0.0, 30, true, 1000.0, 12);
    let payload = Payload::from_dto(&application)?.set("extraField", json!("something"));
    let response = post_decision(ctx, payload).await?;
    ctx.verify().api_status(&response, ApiStatus::Ok)?;
    let body = ctx.verify().json_body(&response)?;
    ctx.verify()
        .field(&body, "riskDecision", Expectation::one_of(RISK_DECISIONS))
}

/// Validation edges, evaluated in collect-all mode.
pub fn validation() -> Suite {
    Suite::new("loan-validation")
        .case(
            TestCase::new("positive application returns an applicationId string", |ctx| {
                Box::pin(application_id_is_string(ctx))
            })
            .soft(),
        )
        .case(
            status_case(
                "income below zero returns 400",
                LoanApplication::employed(-150.0, 0.0, 20, 1500.0, 12),
                ApiStatus::ValidationError,
            )
            .soft(),
        )
        .case(
            status_case(
                "debt below zero returns 400",
                LoanApplication::employed(600.0, -50.0, 20, 1500.0, 12),
                ApiStatus::ValidationError,
            )
            .soft(),
        )
        .case(
            status_case(
                "positive debt is accepted",
                LoanApplication::employed(600.0, 200.0, 20, 1500.0, 12),
                ApiStatus::Ok,
            )
            .soft(),
        )
        .case(
            status_case(
                "age 18 is accepted",
                LoanApplication::employed(600.0, 0.0, 18, 1500.0, 12),
                ApiStatus::Ok,
            )
            .soft(),
        )
        .case(
            status_case(
                "age 14 is accepted",
                LoanApplication::employed(600.0, 0.0, 14, 1500.0, 12),
                ApiStatus::Ok,
            )
            .soft(),
        )
        .case(
            TestCase::new("GET instead of POST returns 405 or 400", |ctx| {
                Box::pin(wrong_method(ctx))
            })
            .soft(),
        )
        .case(
            TestCase::new("unrelated body structure returns 400", |ctx| {
                Box::pin(unrelated_body(ctx))
            })
            .soft(),
        )
}
