//! HTTP transport: JSON-RPC over POST /mcp, optional bearer auth, and /health.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Json as AxumJson, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::protocol::ProtocolHandler;
use crate::types::error_codes::PARSE_ERROR;
use crate::types::{McpError, McpResult};

use super::framing;

/// Shared server state passed to all handlers via axum State.
pub struct ServerState {
    pub token: Option<String>,
    pub toolset: String,
    pub handler: ProtocolHandler,
}

/// HTTP transport for web-based MCP clients.
pub struct HttpTransport {
    state: Arc<ServerState>,
}

impl HttpTransport {
    /// `toolset` is only reported by `/health`.
    pub fn new(handler: ProtocolHandler, toolset: &str, token: Option<String>) -> Self {
        Self {
            state: Arc::new(ServerState {
                token,
                toolset: toolset.to_string(),
                handler,
            }),
        }
    }

    /// The axum router, exposed for in-process testing.
    pub fn router(&self) -> Router {
        let state = self.state.clone();

        Router::new()
            .route("/mcp", post(handle_request))
            .layer(middleware::from_fn_with_state(state.clone(), auth_layer))
            .route("/health", get(handle_health))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
            .with_state(state)
    }

    /// Run the HTTP server on the given address.
    pub async fn run(&self, addr: &str) -> McpResult<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(McpError::Io)?;

        tracing::info!("HTTP transport listening on http://{addr}/mcp");

        axum::serve(listener, app)
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;

        Ok(())
    }
}

fn rpc_error(status: StatusCode, code: i32, message: &str) -> Response {
    (
        status,
        AxumJson(json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": { "code": code, "message": message }
        })),
    )
        .into_response()
}

/// Checks the bearer token if one is configured.
/// `/health` is routed outside this layer.
async fn auth_layer(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: middleware::Next,
) -> Response {
    if let Some(expected) = &state.token {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == expected);

        if !authorized {
            tracing::warn!("Rejected request without a valid bearer token");
            return rpc_error(
                StatusCode::UNAUTHORIZED,
                McpError::Unauthorized.code(),
                "Unauthorized",
            );
        }
    }

    next.run(request).await
}

/// One JSON-RPC message per POST. Notifications get 202 with no body.
///
/// The body is read raw so malformed JSON, a missing content type, and
/// non-UTF-8 bytes all get a JSON-RPC parse error instead of an axum rejection.
async fn handle_request(State(state): State<Arc<ServerState>>, body: Bytes) -> Response {
    let msg = match std::str::from_utf8(&body)
        .map_err(|e| McpError::ParseError(e.to_string()))
        .and_then(framing::parse_message)
    {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Parse error: {e}");
            return rpc_error(StatusCode::BAD_REQUEST, PARSE_ERROR, "Parse error");
        }
    };

    match state.handler.handle_message(msg).await {
        Some(response) => AxumJson(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Health check endpoint: no auth required.
async fn handle_health(State(state): State<Arc<ServerState>>) -> AxumJson<serde_json::Value> {
    AxumJson(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "toolset": state.toolset,
        "initialized": state.handler.is_initialized().await,
    }))
}
