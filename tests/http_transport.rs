use axum::body::{to_bytes, Body};
use futures::StreamExt;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use time_mcp::config::HttpConfig;
use time_mcp::{http, ToolDispatcher};
use tower::ServiceExt;

fn app() -> axum::Router {
    http::router(Arc::new(ToolDispatcher::default()), &HttpConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn rpc_endpoint_calls_tools() {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": "format_timestamp", "arguments": { "timestamp": 0, "format": "utc" } }
    });
    let response = app()
        .oneshot(
            Request::post("/rpc")
                .header("content-type", "application/json")
                .body(Body::from(request.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["result"]["content"][0]["text"],
        "Formatted timestamp: Thu, 01 Jan 1970 00:00:00 GMT"
    );
}

#[tokio::test]
async fn rpc_endpoint_rejects_garbage() {
    let response = app()
        .oneshot(Request::post("/rpc").body(Body::from("not json")).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], -32700);
}

#[tokio::test]
async fn rpc_notifications_have_no_body() {
    let response = app()
        .oneshot(
            Request::post("/rpc")
                .body(Body::from(
                    r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn posting_requires_a_known_session() {
    let ping = r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#;

    let response = app()
        .oneshot(Request::post("/mcp").body(Body::from(ping)).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unknown = format!("/mcp?sessionId={}", uuid::Uuid::new_v4());
    let response = app()
        .oneshot(Request::post(unknown.as_str()).body(Body::from(ping)).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn opening_a_session_streams_events() {
    let response = app()
        .oneshot(Request::get("/mcp").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );
}

#[tokio::test]
async fn stalled_stream_gets_service_unavailable() {
    let config = HttpConfig {
        session_buffer: 1,
        ..HttpConfig::default()
    };
    let app = http::router(Arc::new(ToolDispatcher::default()), &config);

    let stream = app
        .clone()
        .oneshot(Request::get("/mcp").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let mut events = stream.into_body().into_data_stream();
    let first = events.next().await.unwrap().unwrap();
    let first = String::from_utf8(first.to_vec()).unwrap();
    assert!(first.contains("event: endpoint"), "{first}");
    let endpoint = first
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap()
        .trim()
        .to_string();

    let ping = || {
        Request::post(endpoint.as_str())
            .body(Body::from(
                json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" }).to_string(),
            ))
            .unwrap()
    };

    // The stream is never read past the endpoint event, so the one-slot
    // buffer fills and the next post is refused instead of hanging.
    let accepted = app.clone().oneshot(ping()).await.unwrap();
    assert_eq!(accepted.status(), StatusCode::ACCEPTED);
    let refused = app.clone().oneshot(ping()).await.unwrap();
    assert_eq!(refused.status(), StatusCode::SERVICE_UNAVAILABLE);

    drop(events);
}
