//! Order lifecycle on `/orders`, authorised with a bearer token.
//!
//! The create case writes `order_id`; get and delete read it.

use harness_application::{CaseContext, CaseResult, Suite, TestCase};
use harness_domain::{Expectation, Order, OrderStatus, Payload, RequestSpec};

const ORDER_ID: &str = "order_id";

fn bearer_request(ctx: &CaseContext, request: RequestSpec) -> RequestSpec {
    request.bearer(&ctx.settings().bearer_token)
}

async fn create_order(ctx: &mut CaseContext) -> CaseResult<()> {
    let order = Order::new(OrderStatus::Open, 0, "Alice", "+3721234567", "Test order");
    let url = ctx.endpoint("/orders")?;
    let request = bearer_request(ctx, RequestSpec::post(url))
        .header("Content-Type", "application/json")
        .json(Payload::from_dto(&order)?.into_value());

    let response = ctx.send(request).await?;
    let body = ctx.verify().json_body(&response)?;
    ctx.verify().field(&body, "id", Expectation::Defined)?;

    if let Some(id) = body.get("id") {
        ctx.provide(ORDER_ID, id.clone());
    }
    Ok(())
}

async fn get_order(ctx: &mut CaseContext) -> CaseResult<()> {
    let id = ctx.require(ORDER_ID)?.clone();
    let url = ctx.endpoint(&format!("/orders/{}", ctx.require_segment(ORDER_ID)?))?;
    let request = bearer_request(ctx, RequestSpec::get(url));
    let response = ctx.send(request).await?;

    let body = ctx.verify().json_body(&response)?;
    ctx.verify().field(&body, "id", Expectation::Equals(id))
}

async fn delete_order(ctx: &mut CaseContext) -> CaseResult<()> {
    let url = ctx.endpoint(&format!("/orders/{}", ctx.require_segment(ORDER_ID)?))?;
    let request = bearer_request(ctx, RequestSpec::delete(url));
    let response = ctx.send(request).await?;
    ctx.verify().body_not_empty(&response)
}

/// Create, read back and delete one order.
pub fn suite() -> Suite {
    Suite::new("orders")
        .case(TestCase::new("create order", |ctx| Box::pin(create_order(ctx))).provides(ORDER_ID))
        .case(TestCase::new("get order by id", |ctx| Box::pin(get_order(ctx))).requires(ORDER_ID))
        .case(TestCase::new("delete order", |ctx| Box::pin(delete_order(ctx))).requires(ORDER_ID))
}
