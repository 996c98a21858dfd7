//! JSON-RPC 2.0 message types shared by all transports.
//!
//! Inbound messages are decoded leniently (a missing `jsonrpc` field is
//! accepted) but a message that cannot be decoded at all still produces an
//! error reply, correlated by `id` when one can be recovered and `null`
//! otherwise.

use rmcp::model::JsonObject;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::config::{PROTOCOL_VERSION, ServerConfig};
use super::error::Result;

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Absent for notifications. A present `null` is kept as `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Only called when the field is present, so any value (including `null`) is an id.
fn present_id<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    /// Decode one raw message, or produce the error reply it deserves.
    pub fn decode(raw: &str) -> std::result::Result<Self, JsonRpcResponse> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| JsonRpcResponse::parse_error(format!("Parse error: {}", e)))?;

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: Self = serde_json::from_value(value).map_err(|e| {
            JsonRpcResponse::error(Some(id.clone()), INVALID_REQUEST, format!("Invalid Request: {}", e))
        })?;

        match request.jsonrpc.as_deref() {
            None | Some(JSONRPC_VERSION) => Ok(request),
            Some(other) => Err(JsonRpcResponse::error(
                Some(id),
                INVALID_REQUEST,
                format!("Invalid Request: unsupported jsonrpc version '{}'", other),
            )),
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Params of a `tools/call` request.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<JsonObject>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// `None` only for the unsolicited initialization message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Undecodable input; there is no id to correlate with.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(Some(Value::Null), PARSE_ERROR, msg)
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, INVALID_PARAMS, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, INTERNAL_ERROR, msg)
    }

    /// The message announcing the server, sent once when a session opens.
    pub fn initialization(server: &ServerConfig) -> Self {
        Self::success(None, initialize_result(server))
    }

    /// Encode as a single line of JSON (without the trailing newline).
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result payload for `initialize`.
pub fn initialize_result(server: &ServerConfig) -> Value {
    serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name,
            "version": server.version
        }
    })
}

/// Recover the request id from a raw message without fully decoding it.
pub fn extract_id(raw: &str) -> Value {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| v.get("id").cloned())
        .unwrap_or(Value::Null)
}
