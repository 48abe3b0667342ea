use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use wishlist_mcp::envelope::classify_value;
use wishlist_mcp::jsonrpc::{
    INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND, PARSE_ERROR,
};
use wishlist_mcp::{Envelope, JsonRpcRequest, JsonRpcResponse};

use crate::app_state::AppState;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// Handle MCP JSON-RPC requests on `/mcp`.
///
/// Responses are returned inline; notifications get `202 Accepted` and no body.
pub async fn mcp_request(State(state): State<AppState>, body: Bytes) -> Response {
    let Ok(raw) = serde_json::from_slice::<Value>(&body) else {
        return reply(JsonRpcResponse::error(Value::Null, PARSE_ERROR, "Parse error"));
    };

    let req: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
        Ok(req) => req,
        Err(e) => {
            let id = raw.get("id").cloned().unwrap_or(Value::Null);
            return reply(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {e}"),
            ));
        }
    };

    if req.jsonrpc != JSONRPC_VERSION {
        return reply(JsonRpcResponse::error(
            req.id,
            INVALID_REQUEST,
            "Unsupported jsonrpc version",
        ));
    }

    if req.is_notification() {
        tracing::info!("Received MCP notification: {}", req.method);
        return StatusCode::ACCEPTED.into_response();
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => JsonRpcResponse::success(req.id, serde_json::json!({})),
        "tools/list" => handle_tools_list(&state, &req),
        "tools/call" => handle_tools_call(&state, raw).await,
        _ => JsonRpcResponse::error(req.id, METHOD_NOT_FOUND, "Method not found"),
    };

    reply(response)
}

fn reply(response: JsonRpcResponse) -> Response {
    (StatusCode::OK, Json(response)).into_response()
}

fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
    JsonRpcResponse::success(
        req.id.clone(),
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "wishlist",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(state: &AppState, req: &JsonRpcRequest) -> JsonRpcResponse {
    JsonRpcResponse::success(
        req.id.clone(),
        serde_json::json!({ "tools": state.tools.definitions() }),
    )
}

async fn handle_tools_call(state: &AppState, raw: Value) -> JsonRpcResponse {
    match classify_value(raw) {
        Envelope::ToolCall(call) => state
            .tools
            .invoke(&call.name, call.arguments)
            .await
            .into_mcp_response(call.id),
        Envelope::Malformed { id, reason } => JsonRpcResponse::error(id, INVALID_PARAMS, reason),
        // Version and method were checked by the caller.
        Envelope::NotClaimed => {
            JsonRpcResponse::error(Value::Null, INVALID_REQUEST, "Invalid request")
        }
    }
}
