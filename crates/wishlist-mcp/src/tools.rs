use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wishlist_core::Error;

use crate::jsonrpc::{JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS};

/// Definition of an MCP tool exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// A server-side capability invokable through `tools/call`.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Run the tool. `arguments` is always a JSON object.
    ///
    /// # Errors
    ///
    /// Any failure; its display string becomes the JSON-RPC error message.
    async fn call(&self, arguments: Value) -> Result<Value, Error>;
}

/// What happened when a tool call was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Ok(Value),
    Raised(String),
    UnknownTool(String),
}

impl ToolOutcome {
    /// Root-route envelope.
    ///
    /// An unknown tool is reported on the success channel with an embedded
    /// `error` field; handler failures use the error channel.
    pub fn into_response(self, id: Value) -> JsonRpcResponse {
        match self {
            Self::Ok(result) => JsonRpcResponse::success(id, result),
            Self::Raised(message) => JsonRpcResponse::error(id, INTERNAL_ERROR, message),
            Self::UnknownTool(name) => JsonRpcResponse::success(
                id,
                serde_json::json!({ "error": format!("Unknown tool: {name}") }),
            ),
        }
    }

    /// MCP `/mcp` envelope: results wrapped as text content.
    pub fn into_mcp_response(self, id: Value) -> JsonRpcResponse {
        let (text, is_error) = match self {
            Self::Ok(Value::String(text)) => (text, false),
            Self::Ok(value) => (
                serde_json::to_string_pretty(&value).unwrap_or_default(),
                false,
            ),
            Self::Raised(message) => (message, true),
            Self::UnknownTool(name) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {name}"))
            }
        };
        JsonRpcResponse::success(
            id,
            serde_json::json!({
                "content": [{ "type": "text", "text": text }],
                "isError": is_error,
            }),
        )
    }
}

/// Registry of tools, keyed by exact (case-sensitive) name.
///
/// Filled at startup, then shared behind an `Arc` and never mutated.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under the name from its definition.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> &mut Self {
        let name = handler.definition().name;
        if self.tools.insert(name.clone(), handler).is_some() {
            tracing::warn!("Tool '{name}' registered twice; keeping the later handler");
        }
        self
    }

    /// Builder-style `register`.
    #[must_use]
    pub fn with_tool(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        self.register(handler);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.get(name).cloned()
    }

    /// Return the list of tool definitions for the MCP `tools/list` method.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Resolve `name` and run it, folding every failure into a `ToolOutcome`.
    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolOutcome {
        let Some(handler) = self.resolve(name) else {
            tracing::warn!("Unknown tool requested: {name}");
            return ToolOutcome::UnknownTool(name.to_string());
        };

        match handler.call(arguments).await {
            Ok(value) => ToolOutcome::Ok(value),
            Err(err) => {
                tracing::warn!("Tool '{name}' failed: {err}");
                ToolOutcome::Raised(err.to_string())
            }
        }
    }
}
