//! In-process stand-in for the backend, answering the way the real
//! service is observed to answer.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use harness_domain::{LoanApplication, LoanDecision, Order};
use serde_json::{Value, json};

/// Bearer token the stub accepts on `/orders`.
pub const TOKEN: &str = "stub-token";

/// `api_key` the stub accepts on `/test-orders`.
pub const API_KEY: &str = "stub-key";

/// Ids the stub treats as existing on `/test-orders`.
const TEST_ORDER_IDS: std::ops::RangeInclusive<i64> = 1..=10;

#[derive(Default)]
struct StubState {
    orders: Mutex<HashMap<i64, Value>>,
    next_id: AtomicI64,
    applications: AtomicI64,
    broken_orders: bool,
}

/// Options for the stub.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubOptions {
    /// Make `POST /orders` fail with 500.
    pub broken_orders: bool,
}

/// Starts the stub on an ephemeral port and returns its address.
pub async fn spawn(options: StubOptions) -> SocketAddr {
    let state = Arc::new(StubState {
        broken_orders: options.broken_orders,
        ..StubState::default()
    });
    let app = Router::new()
        .route("/api/loan-calc/decision", post(decision))
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order).delete(delete_order))
        .route(
            "/test-orders/{id}",
            get(get_test_order)
                .put(update_test_order)
                .delete(delete_test_order),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

async fn decision(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let is_json = header_value(&headers, header::CONTENT_TYPE.as_str())
        .is_some_and(|v| v.starts_with("application/json"));
    if !is_json {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type").into_response();
    }

    let Ok(application) = serde_json::from_str::<LoanApplication>(&body) else {
        return bad_request("malformed application");
    };
    if application.income <= 0.0
        || application.debt < 0.0
        || application.age <= 0
        || application.age > 100
    {
        return bad_request("validation failed");
    }

    let (risk_decision, risk_level) = if application.age > 70 {
        ("negative", "Very High Risk")
    } else {
        ("positive", "Low Risk")
    };
    let n = state.applications.fetch_add(1, Ordering::SeqCst) + 1;
    Json(LoanDecision {
        risk_decision: risk_decision.to_string(),
        risk_level: risk_level.to_string(),
        application_id: Some(format!("app-{n:06}")),
    })
    .into_response()
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    header_value(headers, header::AUTHORIZATION.as_str())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn create_order(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.broken_orders {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }
    let Ok(order) = serde_json::from_str::<Order>(&body) else {
        return bad_request("malformed order");
    };

    let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let stored = serde_json::to_value(order.with_id(id)).unwrap();
    state.orders.lock().unwrap().insert(id, stored.clone());
    Json(stored).into_response()
}

async fn get_order(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.orders.lock().unwrap().get(&id) {
        Some(order) => Json(order.clone()).into_response(),
        None => bad_request("order not found"),
    }
}

async fn delete_order(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.orders.lock().unwrap().remove(&id) {
        Some(_) => "true".into_response(),
        None => bad_request("order not found"),
    }
}

fn api_key_ok(headers: &HeaderMap) -> bool {
    header_value(headers, "api_key") == Some(API_KEY)
}

fn test_order(id: i64) -> Value {
    json!({
        "id": id,
        "status": "OPEN",
        "quantity": 1,
        "customerName": "stub",
        "phone": "+3720000000",
        "note": "",
    })
}

async fn get_test_order(Path(id): Path<i64>) -> Response {
    if TEST_ORDER_IDS.contains(&id) {
        Json(test_order(id)).into_response()
    } else {
        bad_request("order not found")
    }
}

async fn update_test_order(Path(id): Path<i64>, headers: HeaderMap, body: String) -> Response {
    if !api_key_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Ok(order) = serde_json::from_str::<Order>(&body) else {
        return bad_request("malformed order");
    };
    if !TEST_ORDER_IDS.contains(&id) {
        return bad_request("order not found");
    }
    Json(serde_json::to_value(order.with_id(id)).unwrap()).into_response()
}

async fn delete_test_order(Path(id): Path<i64>, headers: HeaderMap) -> Response {
    if !api_key_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if TEST_ORDER_IDS.contains(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        bad_request("order not found")
    }
}
