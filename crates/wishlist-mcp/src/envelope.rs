//! Decide whether a root-route body is a tool call this server answers.
//!
//! Only bodies that decode as a JSON object with `"jsonrpc": "2.0"` and
//! `"method": "tools/call"` are claimed. Everything else, including invalid
//! JSON and batches, is left for the fallback application.

use serde_json::{Map, Value};

use crate::jsonrpc::{JSONRPC_VERSION, TOOLS_CALL};

/// A validated `tools/call` request.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcToolCall {
    pub id: Value,
    pub name: String,
    /// Always a JSON object.
    pub arguments: Value,
}

/// Result of inspecting a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    ToolCall(JsonRpcToolCall),
    /// Claimed by version and method, but `params` is unusable.
    Malformed { id: Value, reason: String },
    NotClaimed,
}

/// Classify a raw body.
pub fn classify(body: &[u8]) -> Envelope {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => classify_value(value),
        Err(_) => Envelope::NotClaimed,
    }
}

/// Classify an already decoded body.
pub fn classify_value(value: Value) -> Envelope {
    let Value::Object(mut request) = value else {
        return Envelope::NotClaimed;
    };

    let claimed = request.get("jsonrpc").and_then(Value::as_str) == Some(JSONRPC_VERSION)
        && request.get("method").and_then(Value::as_str) == Some(TOOLS_CALL);
    if !claimed {
        return Envelope::NotClaimed;
    }

    let id = request.remove("id").unwrap_or(Value::Null);
    let malformed = |id: Value, reason: &str| Envelope::Malformed {
        id,
        reason: reason.to_string(),
    };

    let mut params = match request.remove("params") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(params)) => params,
        Some(_) => return malformed(id, "params must be an object"),
    };

    let name = match params.remove("name") {
        Some(Value::String(name)) => name,
        Some(_) => return malformed(id, "params.name must be a string"),
        None => return malformed(id, "missing params.name"),
    };

    let arguments = match params.remove("arguments") {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(args @ Value::Object(_)) => args,
        Some(_) => return malformed(id, "params.arguments must be an object"),
    };

    Envelope::ToolCall(JsonRpcToolCall {
        id,
        name,
        arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify_json(value: &Value) -> Envelope {
        classify(value.to_string().as_bytes())
    }

    #[test]
    fn claims_tools_call() {
        let envelope = classify_json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": "search_movies", "arguments": { "query": "Heat" } }
        }));
        assert_eq!(
            envelope,
            Envelope::ToolCall(JsonRpcToolCall {
                id: json!(1),
                name: "search_movies".to_string(),
                arguments: json!({ "query": "Heat" }),
            })
        );
    }

    #[test]
    fn missing_arguments_default_to_empty_object() {
        let envelope = classify_json(&json!({
            "jsonrpc": "2.0",
            "id": "x",
            "method": "tools/call",
            "params": { "name": "search_movies" }
        }));
        let Envelope::ToolCall(call) = envelope else {
            panic!("expected tool call, got {envelope:?}");
        };
        assert_eq!(call.arguments, json!({}));
    }

    #[test]
    fn missing_id_becomes_null() {
        let envelope = classify_json(&json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": { "name": "search_movies" }
        }));
        let Envelope::ToolCall(call) = envelope else {
            panic!("expected tool call, got {envelope:?}");
        };
        assert!(call.id.is_null());
    }

    #[test]
    fn invalid_json_is_not_claimed() {
        assert_eq!(classify(b"not json at all"), Envelope::NotClaimed);
        assert_eq!(classify(b""), Envelope::NotClaimed);
    }

    #[test]
    fn other_methods_are_not_claimed() {
        let envelope = classify_json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list"
        }));
        assert_eq!(envelope, Envelope::NotClaimed);
    }

    #[test]
    fn wrong_version_is_not_claimed() {
        let envelope = classify_json(&json!({
            "jsonrpc": "1.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": "search_movies" }
        }));
        assert_eq!(envelope, Envelope::NotClaimed);
    }

    #[test]
    fn batches_are_not_claimed() {
        let envelope = classify_json(&json!([{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": "search_movies" }
        }]));
        assert_eq!(envelope, Envelope::NotClaimed);
    }

    #[test]
    fn missing_name_is_malformed() {
        let envelope = classify_json(&json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "tools/call",
            "params": {}
        }));
        assert!(matches!(envelope, Envelope::Malformed { id, .. } if id == json!(9)));
    }

    #[test]
    fn non_object_arguments_are_malformed() {
        let envelope = classify_json(&json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "tools/call",
            "params": { "name": "search_movies", "arguments": ["Heat"] }
        }));
        assert!(matches!(envelope, Envelope::Malformed { .. }));
    }
}
