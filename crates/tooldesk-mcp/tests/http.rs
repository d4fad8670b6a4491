//! HTTP transport tests, run in-process against the axum router.
#![cfg(feature = "http")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use tooldesk_mcp::protocol::ProtocolHandler;
use tooldesk_mcp::tools::Toolset;
use tooldesk_mcp::transport::HttpTransport;

fn transport(token: Option<&str>) -> HttpTransport {
    let handler = ProtocolHandler::new(Toolset::Demo.service().unwrap());
    HttpTransport::new(handler, "demo", token.map(str::to_string))
}

fn post_mcp(body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_of(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_tool_call_over_http() {
    let app = transport(None).router();
    let response = app
        .oneshot(post_mcp(
            json!({
                "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                "params": {"name": "echo", "arguments": {"message": "over http"}}
            }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_of(response).await;
    assert_eq!(body["result"]["content"][0]["text"], "over http");
}

#[tokio::test]
async fn test_notification_is_accepted_without_body() {
    let app = transport(None).router();
    let response = app
        .oneshot(post_mcp(
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_bearer_token_required_when_configured() {
    let t = transport(Some("s3cret"));
    let ping = json!({"jsonrpc": "2.0", "id": 1, "method": "ping"});

    let response = t.router().oneshot(post_mcp(ping.clone(), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_of(response).await["error"]["code"], -32900);

    let response = t
        .router()
        .oneshot(post_mcp(ping.clone(), Some("wrong")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = t
        .router()
        .oneshot(post_mcp(ping, Some("s3cret")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_skips_auth() {
    let app = transport(Some("s3cret")).router();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_of(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["toolset"], "demo");
    assert_eq!(body["initialized"], false);
}

#[tokio::test]
async fn test_non_jsonrpc_body_is_parse_error() {
    let app = transport(None).router();
    let response = app
        .oneshot(post_mcp(json!({"hello": "world"}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(response).await["error"]["code"], -32700);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let app = transport(None).router();
    let request = Request::post("/mcp")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_of(response).await;
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn test_body_without_content_type_is_still_handled() {
    let t = transport(None);

    let request = Request::post("/mcp")
        .body(Body::from(r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#))
        .unwrap();
    let response = t.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_of(response).await["id"], 3);

    let request = Request::post("/mcp")
        .body(Body::from(vec![0xff_u8, 0xfe]))
        .unwrap();
    let response = t.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(response).await["error"]["code"], -32700);
}
