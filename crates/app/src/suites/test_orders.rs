//! Fixed-id order endpoints on `/test-orders`, authorised with `api_key`.
//!
//! Id 1 exists on the server; 0 and 999999 never do. Missing orders come
//! back as 400 on this API.

use harness_application::{CaseContext, CaseResult, Suite, TestCase};
use harness_domain::{ApiStatus, HttpMethod, Order, OrderStatus, Payload, RequestSpec};

const EXISTING_ID: i64 = 1;
const MISSING_ID: i64 = 999_999;

#[derive(Debug, Clone, Copy)]
enum Key {
    None,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Copy)]
enum Body {
    None,
    Valid,
    MissingFields,
}

fn valid_order() -> Order {
    Order::new(OrderStatus::Open, 1, "John", "+3725555555", "update").with_id(EXISTING_ID)
}

async fn call(
    ctx: &mut CaseContext,
    method: HttpMethod,
    id: i64,
    key: Key,
    body: Body,
    expected: ApiStatus,
) -> CaseResult<()> {
    let url = ctx.endpoint(&format!("/test-orders/{id}"))?;
    let mut request = RequestSpec::new(method, url);

    request = match key {
        Key::None => request,
        Key::Valid => request.api_key(&ctx.settings().api_key),
        Key::Invalid => request.api_key(&ctx.settings().invalid_api_key),
    };
    request = match body {
        Body::None => request,
        Body::Valid => request.json(Payload::from_dto(&valid_order())?.into_value()),
        Body::MissingFields => request.json(
            Payload::from_dto(&valid_order())?
                .remove("customerName")
                .remove("phone")
                .into_value(),
        ),
    };

    let response = ctx.send(request).await?;
    ctx.verify().api_status(&response, expected)
}

fn case(
    name: &str,
    method: HttpMethod,
    id: i64,
    key: Key,
    body: Body,
    expected: ApiStatus,
) -> TestCase {
    TestCase::new(name, move |ctx| {
        Box::pin(call(ctx, method, id, key, body, expected))
    })
}

/// Reads, updates and deletes fixed ids.
pub fn suite() -> Suite {
    use HttpMethod::{Delete, Get, Put};

    Suite::new("test-orders")
        .case(case(
            "get existing order returns 200",
            Get,
            EXISTING_ID,
            Key::None,
            Body::None,
            ApiStatus::Ok,
        ))
        .case(case(
            "get nonexistent order returns 400",
            Get,
            MISSING_ID,
            Key::None,
            Body::None,
            ApiStatus::ValidationError,
        ))
        .case(case(
            "update with valid data and valid key returns 200",
            Put,
            EXISTING_ID,
            Key::Valid,
            Body::Valid,
            ApiStatus::Ok,
        ))
        .case(case(
            "update with missing fields returns 400",
            Put,
            EXISTING_ID,
            Key::Valid,
            Body::MissingFields,
            ApiStatus::ValidationError,
        ))
        .case(case(
            "update with invalid key returns 401",
            Put,
            EXISTING_ID,
            Key::Invalid,
            Body::Valid,
            ApiStatus::AuthError,
        ))
        .case(case(
            "delete existing order returns 204",
            Delete,
            EXISTING_ID,
            Key::Valid,
            Body::None,
            ApiStatus::NoContent,
        ))
        .case(case(
            "delete order id 0 returns 400",
            Delete,
            0,
            Key::Valid,
            Body::None,
            ApiStatus::ValidationError,
        ))
        .case(case(
            "delete nonexistent order returns 400",
            Delete,
            MISSING_ID,
            Key::Valid,
            Body::None,
            ApiStatus::ValidationError,
        ))
}
