//! Root-route JSON-RPC interception.
//!
//! `POST /` bodies that are JSON-RPC 2.0 `tools/call` requests are answered
//! here from the tool registry. Every other request reaches the wrapped
//! fallback application unchanged, with its body replayed byte for byte.
//!
//! Claimed requests always get HTTP 200; success or failure is carried in
//! the JSON-RPC envelope only.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};

use tokio_stream::StreamExt;

use wishlist_mcp::jsonrpc::INVALID_PARAMS;
use wishlist_mcp::{classify, Envelope, JsonRpcResponse};

use crate::app_state::AppState;

/// Put the dispatcher in front of `fallback`.
pub fn layer_over(fallback: Router, state: AppState) -> Router {
    Router::new()
        .fallback_service(fallback)
        .layer(middleware::from_fn_with_state(state, intercept))
}

/// Middleware entry point.
pub async fn intercept(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() != Method::POST || req.uri().path() != "/" {
        return next.run(req).await;
    }

    // Too big to inspect; the fallback gets it untouched.
    if declared_length(&req).is_some_and(|len| len > state.max_body_bytes) {
        tracing::debug!("POST / body exceeds {} bytes, passing through", state.max_body_bytes);
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();
    let bytes = match accumulate(body, state.max_body_bytes).await {
        Ok(Accumulated::Complete(bytes)) => bytes,
        Ok(Accumulated::Overflow(replay)) => {
            tracing::debug!("POST / body exceeds {} bytes, passing through", state.max_body_bytes);
            return next.run(Request::from_parts(parts, replay)).await;
        }
        Err(err) => {
            tracing::warn!("Failed to read request body: {err}");
            return (StatusCode::BAD_REQUEST, "failed to read request body").into_response();
        }
    };

    match classify(&bytes) {
        Envelope::NotClaimed => {
            tracing::debug!("POST / is not a tool call, passing through");
            next.run(Request::from_parts(parts, Body::from(bytes))).await
        }
        Envelope::Malformed { id, reason } => {
            tracing::warn!("Malformed tools/call (id {id}): {reason}");
            reply(JsonRpcResponse::error(id, INVALID_PARAMS, reason))
        }
        Envelope::ToolCall(call) => {
            tracing::info!("tools/call '{}' (id {})", call.name, call.id);
            let outcome = state.tools.invoke(&call.name, call.arguments).await;
            reply(outcome.into_response(call.id))
        }
    }
}

enum Accumulated {
    Complete(Bytes),
    /// The limit was crossed; this body replays what was read, then the rest.
    Overflow(Body),
}

/// Collect every frame of `body` before anything looks at it.
async fn accumulate(body: Body, limit: usize) -> Result<Accumulated, axum::Error> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        buf.extend_from_slice(&chunk);
        if buf.len() > limit {
            let read = tokio_stream::once(Ok(Bytes::from(buf)));
            return Ok(Accumulated::Overflow(Body::from_stream(read.chain(stream))));
        }
    }
    Ok(Accumulated::Complete(Bytes::from(buf)))
}

fn declared_length(req: &Request) -> Option<usize> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn reply(response: JsonRpcResponse) -> Response {
    (StatusCode::OK, Json(response)).into_response()
}
