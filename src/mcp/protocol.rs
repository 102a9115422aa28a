//! MCP protocol types and message definitions.
//!
//! Based on the Model Context Protocol specification (JSON-RPC 2.0 envelopes
//! plus the MCP method set).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::Error;

/// JSON-RPC version.
pub const JSONRPC_VERSION: &str = "2.0";

/// Latest MCP protocol version spoken by this server.
pub const MCP_VERSION: &str = "2025-06-18";

/// Protocol versions accepted during negotiation, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

// ===== JSON-RPC Base Types =====

/// A JSON-RPC request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A JSON-RPC response.
///
/// `id` is `null` only when the request id could not be determined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Build a success envelope.
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Build an error envelope.
    pub fn error(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Build an error envelope from a crate error.
    pub fn from_error(id: Option<RequestId>, error: &Error) -> Self {
        Self::error(id, JsonRpcError::from(error))
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A JSON-RPC notification (no id, no response expected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A JSON-RPC error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl From<&Error> for JsonRpcError {
    fn from(err: &Error) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Request ID (can be string or number).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

// ===== Message Classification =====

/// A validated incoming message.
#[derive(Debug, Clone)]
pub enum IncomingMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

/// A message rejected before dispatch, with whatever id could be recovered.
#[derive(Debug)]
pub struct Rejected {
    pub id: Option<RequestId>,
    pub error: Error,
}

impl Rejected {
    fn new(id: Option<RequestId>, error: Error) -> Self {
        Self { id, error }
    }

    pub fn into_response(self) -> JsonRpcResponse {
        JsonRpcResponse::from_error(self.id, &self.error)
    }
}

impl IncomingMessage {
    /// Classify a decoded JSON value as a request or a notification.
    ///
    /// The presence of `id` makes a message a request. Anything that fails
    /// validation is rejected and never treated as a notification.
    pub fn classify(value: Value) -> std::result::Result<Self, Rejected> {
        let Value::Object(mut obj) = value else {
            return Err(Rejected::new(
                None,
                Error::InvalidRequest(
                    "Invalid JSON-RPC 2.0 request: expected a single JSON object".to_string(),
                ),
            ));
        };

        let id = match obj.remove("id") {
            None => None,
            Some(raw) => match serde_json::from_value::<RequestId>(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    return Err(Rejected::new(
                        None,
                        Error::InvalidRequest(
                            "Invalid request id: expected a string or an integer".to_string(),
                        ),
                    ))
                }
            },
        };

        match obj.get("jsonrpc") {
            Some(Value::String(version)) if version == JSONRPC_VERSION => {}
            _ => {
                return Err(Rejected::new(
                    id,
                    Error::Parse("Invalid JSON-RPC 2.0 request: jsonrpc must be \"2.0\"".to_string()),
                ))
            }
        }

        let method = match obj.remove("method") {
            Some(Value::String(method)) if !method.is_empty() => method,
            _ => {
                return Err(Rejected::new(
                    id,
                    Error::InvalidRequest("Invalid JSON-RPC 2.0 request: missing method".to_string()),
                ))
            }
        };

        let params = obj.remove("params").filter(|p| !p.is_null());

        match id {
            Some(id) => {
                if let Some(ref p) = params {
                    if !p.is_object() {
                        return Err(Rejected::new(
                            Some(id),
                            Error::invalid_params("params must be an object"),
                        ));
                    }
                }
                Ok(Self::Request(JsonRpcRequest {
                    jsonrpc: JSONRPC_VERSION.to_string(),
                    id,
                    method,
                    params,
                }))
            }
            None => Ok(Self::Notification(JsonRpcNotification {
                jsonrpc: JSONRPC_VERSION.to_string(),
                method,
                params,
            })),
        }
    }
}

/// Best-effort id recovery from a raw message, for errors raised before
/// classification.
pub fn extract_id(value: &Value) -> Option<RequestId> {
    value
        .get("id")
        .and_then(|id| serde_json::from_value(id.clone()).ok())
}

// ===== Methods =====

/// Every request method the server routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Initialize,
    Ping,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
    PromptsList,
    PromptsGet,
    CompletionComplete,
    LoggingSetLevel,
}

impl Method {
    pub const ALL: [Method; 10] = [
        Self::Initialize,
        Self::Ping,
        Self::ToolsList,
        Self::ToolsCall,
        Self::ResourcesList,
        Self::ResourcesRead,
        Self::PromptsList,
        Self::PromptsGet,
        Self::CompletionComplete,
        Self::LoggingSetLevel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Ping => "ping",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::ResourcesList => "resources/list",
            Self::ResourcesRead => "resources/read",
            Self::PromptsList => "prompts/list",
            Self::PromptsGet => "prompts/get",
            Self::CompletionComplete => "completion/complete",
            Self::LoggingSetLevel => "logging/setLevel",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Whether the session must have completed `initialize` first.
    pub fn requires_initialization(self) -> bool {
        !matches!(self, Self::Initialize | Self::Ping)
    }
}

/// Notifications the server recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Initialized,
    Cancelled,
    ToolsListChanged,
    Unknown,
}

impl NotificationKind {
    pub fn parse(method: &str) -> Self {
        match method {
            "initialized" | "notifications/initialized" => Self::Initialized,
            "notifications/cancelled" => Self::Cancelled,
            "notifications/tools/list_changed" => Self::ToolsListChanged,
            _ => Self::Unknown,
        }
    }
}

// ===== MCP-Specific Types =====

/// Server capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcesCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts: Option<PromptsCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<EmptyCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completions: Option<EmptyCapability>,
}

impl ServerCapabilities {
    /// Everything this server implements. Registries are static, so nothing
    /// ever changes or can be subscribed to.
    pub fn full() -> Self {
        Self {
            tools: Some(ToolsCapability::default()),
            resources: Some(ResourcesCapability::default()),
            prompts: Some(PromptsCapability::default()),
            logging: Some(EmptyCapability {}),
            completions: Some(EmptyCapability {}),
        }
    }
}

/// Tools capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(default)]
    pub list_changed: bool,
}

/// Resources capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesCapability {
    #[serde(default)]
    pub subscribe: bool,
    #[serde(default)]
    pub list_changed: bool,
}

/// Prompts capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptsCapability {
    #[serde(default)]
    pub list_changed: bool,
}

/// Capability advertised as a bare `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyCapability {}

/// Server info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Client info sent with `initialize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// Initialize params.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub capabilities: Map<String, Value>,
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// Initialize result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Tool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}

/// Tool call result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

/// Content block in a tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// List tools result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    pub tools: Vec<Tool>,
}

/// Call tool params.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

// ===== Error Codes =====

/// JSON-RPC error codes, plus the MCP resource-not-found extension.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const RESOURCE_NOT_FOUND: i32 = -32002;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_jsonrpc_response_success() {
        let response = JsonRpcResponse::success(RequestId::Number(1), json!({"ok": true}));

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_jsonrpc_response_error_with_null_id() {
        let response = JsonRpcResponse::from_error(None, &Error::Parse("Invalid JSON".into()));

        let json: Value = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], Value::Null);
        assert_eq!(json["error"]["code"], -32700);
        assert!(json.get("result").is_none());
        assert!(json["error"].get("data").is_none());
    }

    #[test]
    fn test_request_id_variants() {
        let id_num = RequestId::Number(42);
        let id_str = RequestId::String("request-1".to_string());

        assert_eq!(serde_json::to_string(&id_num).unwrap(), "42");
        assert_eq!(serde_json::to_string(&id_str).unwrap(), "\"request-1\"");
        assert_eq!(id_str.to_string(), "request-1");
    }

    #[test]
    fn test_classify_request() {
        let msg = IncomingMessage::classify(json!({
            "jsonrpc": "2.0", "id": "abc", "method": "tools/list", "params": {}
        }))
        .unwrap();

        match msg {
            IncomingMessage::Request(req) => {
                assert_eq!(req.id, RequestId::String("abc".to_string()));
                assert_eq!(req.method, "tools/list");
            }
            IncomingMessage::Notification(_) => panic!("expected request"),
        }
    }

    #[test]
    fn test_classify_notification() {
        let msg = IncomingMessage::classify(json!({
            "jsonrpc": "2.0", "method": "initialized"
        }))
        .unwrap();
        assert!(matches!(msg, IncomingMessage::Notification(n) if n.method == "initialized"));
    }

    #[test]
    fn test_classify_rejects_wrong_version() {
        let rejected = IncomingMessage::classify(json!({
            "jsonrpc": "1.0", "id": 7, "method": "ping"
        }))
        .unwrap_err();
        assert_eq!(rejected.id, Some(RequestId::Number(7)));
        assert_eq!(rejected.error.code(), error_codes::PARSE_ERROR);

        // Missing version on an id-less message is still rejected, not ignored.
        let rejected = IncomingMessage::classify(json!({ "method": "initialized" })).unwrap_err();
        assert_eq!(rejected.id, None);
        assert_eq!(rejected.error.code(), error_codes::PARSE_ERROR);
    }

    #[test]
    fn test_classify_rejects_bad_shapes() {
        let rejected = IncomingMessage::classify(json!([1, 2])).unwrap_err();
        assert_eq!(rejected.error.code(), error_codes::INVALID_REQUEST);

        let rejected =
            IncomingMessage::classify(json!({"jsonrpc": "2.0", "id": null, "method": "ping"}))
                .unwrap_err();
        assert_eq!(rejected.id, None);
        assert_eq!(rejected.error.code(), error_codes::INVALID_REQUEST);

        let rejected =
            IncomingMessage::classify(json!({"jsonrpc": "2.0", "id": 1.5, "method": "ping"}))
                .unwrap_err();
        assert_eq!(rejected.error.code(), error_codes::INVALID_REQUEST);

        let rejected = IncomingMessage::classify(json!({"jsonrpc": "2.0", "id": 3})).unwrap_err();
        assert_eq!(rejected.id, Some(RequestId::Number(3)));
        assert_eq!(rejected.error.code(), error_codes::INVALID_REQUEST);

        let rejected = IncomingMessage::classify(
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/list", "params": [1]}),
        )
        .unwrap_err();
        assert_eq!(rejected.error.code(), error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_extract_id() {
        assert_eq!(extract_id(&json!({"id": 9})), Some(RequestId::Number(9)));
        assert_eq!(extract_id(&json!({"id": true})), None);
        assert_eq!(extract_id(&json!("nope")), None);
    }

    #[test]
    fn test_method_parse() {
        for method in Method::ALL {
            assert_eq!(Method::parse(method.as_str()), Some(method));
        }
        assert_eq!(Method::parse("tools/destroy"), None);
        assert!(!Method::Initialize.requires_initialization());
        assert!(!Method::Ping.requires_initialization());
        assert!(Method::ToolsCall.requires_initialization());
        assert!(Method::LoggingSetLevel.requires_initialization());
    }

    #[test]
    fn test_notification_kind() {
        assert_eq!(NotificationKind::parse("initialized"), NotificationKind::Initialized);
        assert_eq!(
            NotificationKind::parse("notifications/initialized"),
            NotificationKind::Initialized
        );
        assert_eq!(
            NotificationKind::parse("notifications/tools/list_changed"),
            NotificationKind::ToolsListChanged
        );
        assert_eq!(NotificationKind::parse("whatever"), NotificationKind::Unknown);
    }

    #[test]
    fn test_server_capabilities_camel_case() {
        let json = serde_json::to_value(ServerCapabilities::full()).unwrap();
        assert_eq!(json["tools"]["listChanged"], false);
        assert_eq!(json["resources"]["subscribe"], false);
        assert_eq!(json["logging"], json!({}));
        assert_eq!(json["completions"], json!({}));
    }

    #[test]
    fn test_initialize_result() {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo {
                name: "sample-design-system-mcp".to_string(),
                version: "1.0.0".to_string(),
            },
            instructions: None,
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"protocolVersion\""));
        assert!(json.contains("\"serverInfo\""));
        assert!(!json.contains("\"instructions\""));
    }

    #[test]
    fn test_tool_result_camel_case() {
        let result = ToolResult {
            content: vec![ContentBlock::Text { text: "ok".to_string() }],
            is_error: false,
            structured_content: Some(json!({"score": 100})),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["isError"], false);
        assert_eq!(json["structuredContent"]["score"], 100);
    }
}
