//! End-to-end scenarios: gateway router in front of the stub engine.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use futures::future::join_all;
use tower::ServiceExt;

use order_gateway::gateway::build_router;
use order_gateway::gateway::state::AppState;
use order_gateway::gateway::stub_engine::{StubEngine, unreachable_url};
use order_gateway::gateway::types::INTERNAL_ERROR_MESSAGE;
use order_gateway::{EngineForwarder, ErrorEnvelope, OrderIdAllocator};

const BTC_LIMIT_BUY: &str =
    r#"{"type": "limit", "side": "buy", "price": "100", "quantity": "5", "name": "BTC-USD"}"#;

fn gateway(engine_url: &str, first_id: u64) -> Router {
    let engine = EngineForwarder::new(engine_url, Duration::from_secs(5)).unwrap();
    build_router(AppState::new(OrderIdAllocator::starting_at(first_id), engine))
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn form(body: &str) -> HashMap<String, String> {
    serde_urlencoded::from_str(body).unwrap()
}

#[tokio::test]
async fn scenario_new_order_is_translated_with_allocated_id() {
    let engine = StubEngine::start().await.unwrap();
    let app = gateway(&engine.url(), 500);

    let (status, body) = send(&app, post("/api/v1/trade", BTC_LIMIT_BUY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"message": "Order placed successfully"}"#);

    let seen = engine.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/trade");
    assert_eq!(
        seen[0].content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        seen[0].body,
        "orderid=500&tradetype=limit&side=buy&price=100&quantity=5&book=BTC-USD"
    );
}

#[tokio::test]
async fn scenario_cancel_with_zero_id_is_rejected_locally() {
    let engine = StubEngine::start().await.unwrap();
    let app = gateway(&engine.url(), 1);

    let (status, body) = send(
        &app,
        post("/api/v1/cancel", r#"{"orderid": 0, "book": "BTC-USD"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let env: ErrorEnvelope = serde_json::from_str(&body).unwrap();
    assert_eq!(env.code, 400);
    assert_eq!(env.message, "orderid field is required, and cannot be zero");
    assert!(engine.requests().is_empty());
}

#[tokio::test]
async fn scenario_engine_unreachable_then_id_not_reused() {
    let url = unreachable_url().await.unwrap();
    let engine_down = EngineForwarder::new(&url, Duration::from_secs(5)).unwrap();
    let ids = std::sync::Arc::new(OrderIdAllocator::new());

    // First attempt: engine down
    {
        let service = order_gateway::OrderService::new(&ids, &engine_down);
        let err = service
            .place_order(BTC_LIMIT_BUY.as_bytes())
            .await
            .unwrap_err();
        assert!(!err.is_client_error());
    }

    // Same allocator, engine back up: the failed attempt's id is gone
    let engine = StubEngine::start().await.unwrap();
    let engine_up = EngineForwarder::new(&engine.url(), Duration::from_secs(5)).unwrap();
    let placed = order_gateway::OrderService::new(&ids, &engine_up)
        .place_order(BTC_LIMIT_BUY.as_bytes())
        .await
        .unwrap();
    assert_eq!(placed.order_id, 2);
}

#[tokio::test]
async fn scenario_engine_unreachable_gives_generic_envelope() {
    let url = unreachable_url().await.unwrap();
    let app = gateway(&url, 1);

    for req in [
        post("/api/v1/trade", BTC_LIMIT_BUY),
        post("/api/v1/cancel", r#"{"orderid": 9, "book": "BTC-USD"}"#),
        Request::get("/api/v1/status").body(Body::empty()).unwrap(),
    ] {
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let env: ErrorEnvelope = serde_json::from_str(&body).unwrap();
        assert_eq!(env.code, 500);
        assert_eq!(env.message, INTERNAL_ERROR_MESSAGE);
    }
}

#[tokio::test]
async fn scenario_engine_timeout_gives_generic_envelope() {
    let engine = StubEngine::start_with_delay(Duration::from_secs(2))
        .await
        .unwrap();
    let forwarder = EngineForwarder::new(&engine.url(), Duration::from_millis(100)).unwrap();
    let app = build_router(AppState::new(OrderIdAllocator::new(), forwarder));

    let (status, body) = send(&app, post("/api/v1/trade", BTC_LIMIT_BUY)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains(INTERNAL_ERROR_MESSAGE));
}

#[tokio::test]
async fn scenario_concurrent_orders_get_distinct_ids() {
    let engine = StubEngine::start().await.unwrap();
    let app = gateway(&engine.url(), 1);

    let results = join_all((0..20).map(|i| {
        let body = format!(
            r#"{{"type": "gtc", "side": "{}", "price": {}, "quantity": 1, "name": "ETH-USD"}}"#,
            if i % 2 == 0 { "buy" } else { "sell" },
            100 + i
        );
        let app = app.clone();
        async move { send(&app, post("/api/v1/trade", &body)).await }
    }))
    .await;

    for (status, _) in &results {
        assert_eq!(*status, StatusCode::OK);
    }

    let ids: HashSet<u64> = engine
        .requests()
        .iter()
        .map(|r| form(&r.body)["orderid"].parse().unwrap())
        .collect();
    assert_eq!(ids.len(), 20);
    assert!(!ids.contains(&0));
    assert_eq!(ids.iter().max(), Some(&20));
}

#[tokio::test]
async fn place_then_cancel_round_trip() {
    let engine = StubEngine::start().await.unwrap();
    let app = gateway(&engine.url(), 10);

    send(&app, post("/api/v1/trade", BTC_LIMIT_BUY)).await;
    assert_eq!(engine.resting("BTC-USD"), vec![10]);

    let (status, body) = send(&app, Request::get("/api/v1/status").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"BTC-USD":{"size":1}}"#);

    let (status, _) = send(
        &app,
        post("/api/v1/cancel", r#"{"orderid": 10, "book": "BTC-USD"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Engine's 404 is relayed, not turned into a gateway error
    let (status, body) = send(
        &app,
        post("/api/v1/cancel", r#"{"orderid": 10, "book": "BTC-USD"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"message": "Order ID not found"}"#);
}

#[tokio::test]
async fn malformed_bodies_are_client_errors() {
    let engine = StubEngine::start().await.unwrap();
    let app = gateway(&engine.url(), 1);

    for body in [
        "not json",
        r#"{"type": "limit"}"#,
        r#"{"type": "limit", "side": "up", "price": 1, "quantity": 1, "name": "X"}"#,
        r#"{"type": "limit", "side": "buy", "price": -1, "quantity": 1, "name": "X"}"#,
        r#"{"type": "limit", "side": "buy", "price": 1, "quantity": "1.5", "name": "X"}"#,
        r#"{"type": "limit", "side": "buy", "price": 1, "quantity": 0, "name": "X"}"#,
        r#"{"type": "limit", "side": "buy", "price": 1, "quantity": 1, "name": ""}"#,
    ] {
        let (status, resp) = send(&app, post("/api/v1/trade", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        let env: ErrorEnvelope = serde_json::from_str(&resp).unwrap();
        assert_eq!(env.code, 400);
        assert!(!env.message.is_empty());
    }
    assert!(engine.requests().is_empty());

    // Nothing was consumed by the rejected requests
    send(&app, post("/api/v1/trade", BTC_LIMIT_BUY)).await;
    assert_eq!(form(&engine.requests()[0].body)["orderid"], "1");
}
