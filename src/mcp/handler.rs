//! Tool registry and argument helpers.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::mcp::protocol::{ContentBlock, Tool, ToolResult};

/// Handler for MCP tool calls.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the tool definition.
    fn definition(&self) -> Tool;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: HashMap<String, Value>) -> Result<ToolResult>;
}

/// Registry of tool handlers, listed in registration order.
pub struct McpHandler {
    tools: Vec<Arc<dyn ToolHandler>>,
    by_name: HashMap<String, usize>,
}

impl McpHandler {
    /// Create a new handler registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a tool handler. A second registration under the same name
    /// replaces the first in place.
    pub fn register<T: ToolHandler + 'static>(&mut self, handler: T) {
        let name = handler.definition().name;
        let handler: Arc<dyn ToolHandler> = Arc::new(handler);
        match self.by_name.get(&name) {
            Some(&index) => self.tools[index] = handler,
            None => {
                self.by_name.insert(name, self.tools.len());
                self.tools.push(handler);
            }
        }
    }

    /// Get all registered tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|h| h.definition()).collect()
    }

    /// Get a tool by name.
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.by_name.get(name).map(|&i| self.tools[i].clone())
    }

    /// Tool names in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|h| h.definition().name).collect()
    }

    /// Get the number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for McpHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro for creating tool input schemas.
#[macro_export]
macro_rules! tool_schema {
    (required: [$($req:expr),* $(,)?], $($json:tt)+) => {
        serde_json::json!({
            "type": "object",
            "properties": {
                $($json)+
            },
            "required": [$($req),*]
        })
    };
    ($($json:tt)+) => {
        serde_json::json!({
            "type": "object",
            "properties": {
                $($json)+
            }
        })
    };
}

/// Helper to create a text content block.
pub fn text_content(text: impl Into<String>) -> ContentBlock {
    ContentBlock::Text { text: text.into() }
}

/// Helper to create a successful tool result.
pub fn success_result(text: impl Into<String>) -> ToolResult {
    ToolResult {
        content: vec![text_content(text)],
        is_error: false,
        structured_content: None,
    }
}

/// Successful result carrying the value both as pretty JSON text and as
/// structured content.
pub fn structured_result<T: Serialize>(value: &T) -> Result<ToolResult> {
    let structured = serde_json::to_value(value)?;
    let text = serde_json::to_string_pretty(&structured)?;
    Ok(ToolResult {
        content: vec![text_content(text)],
        is_error: false,
        structured_content: Some(structured),
    })
}

/// Successful result carrying pretty JSON text only.
pub fn json_result<T: Serialize>(value: &T) -> Result<ToolResult> {
    Ok(success_result(serde_json::to_string_pretty(value)?))
}

/// Deserialize tool arguments into a typed struct.
///
/// Shape errors surface as InvalidParams carrying the serde message.
pub fn parse_arguments<T: DeserializeOwned>(args: HashMap<String, Value>) -> Result<T> {
    let object: serde_json::Map<String, Value> = args.into_iter().collect();
    serde_json::from_value(Value::Object(object))
        .map_err(|e| Error::invalid_params(format!("Invalid arguments: {}", e)))
}

/// Helper to extract a required string argument.
pub fn get_string_arg(args: &HashMap<String, Value>, name: &str) -> Result<String> {
    args.get(name)
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| Error::invalid_params(format!("Missing required argument: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    struct TestTool {
        name: String,
    }

    #[async_trait]
    impl ToolHandler for TestTool {
        fn definition(&self) -> Tool {
            Tool {
                name: self.name.clone(),
                description: format!("Test tool: {}", self.name),
                input_schema: tool_schema! {
                    "input": { "type": "string" }
                },
                output_schema: None,
            }
        }

        async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
            let input = get_string_arg(&args, "input").unwrap_or_default();
            Ok(success_result(format!("Executed {} with: {}", self.name, input)))
        }
    }

    #[test]
    fn test_handler_registration() {
        let mut handler = McpHandler::new();
        handler.register(TestTool {
            name: "test_tool".to_string(),
        });

        assert_eq!(handler.tool_count(), 1);
        assert!(handler.get_tool("test_tool").is_some());
        assert!(handler.get_tool("nonexistent").is_none());
    }

    #[test]
    fn test_handler_lists_in_registration_order() {
        let mut handler = McpHandler::new();
        for name in ["zeta", "alpha", "mid"] {
            handler.register(TestTool {
                name: name.to_string(),
            });
        }
        handler.register(TestTool {
            name: "alpha".to_string(),
        });

        assert_eq!(handler.tool_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(handler.list_tools().len(), 3);
    }

    #[tokio::test]
    async fn test_tool_execution() {
        let mut handler = McpHandler::new();
        handler.register(TestTool {
            name: "echo".to_string(),
        });

        let tool = handler.get_tool("echo").unwrap();
        let mut args = HashMap::new();
        args.insert("input".to_string(), json!("hello"));

        let result = tool.execute(args).await.unwrap();
        assert!(!result.is_error);

        let ContentBlock::Text { text } = &result.content[0];
        assert!(text.contains("Executed echo with: hello"));
    }

    #[test]
    fn test_tool_schema_macro_with_required() {
        let schema = tool_schema! {
            required: ["code"],
            "code": { "type": "string" }
        };
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["code"]));
        assert_eq!(schema["properties"]["code"]["type"], "string");
    }

    #[test]
    fn test_parse_arguments() {
        #[derive(Debug, Deserialize)]
        struct Args {
            query: String,
            #[serde(default)]
            limit: Option<u32>,
        }

        let mut args = HashMap::new();
        args.insert("query".to_string(), json!("nav"));
        let parsed: Args = parse_arguments(args).unwrap();
        assert_eq!(parsed.query, "nav");
        assert!(parsed.limit.is_none());

        let mut bad = HashMap::new();
        bad.insert("query".to_string(), json!(42));
        let err = parse_arguments::<Args>(bad).unwrap_err();
        assert_eq!(err.code(), -32602);
        assert!(err.to_string().starts_with("Invalid arguments:"));

        assert!(parse_arguments::<Args>(HashMap::new()).is_err());
    }

    #[test]
    fn test_get_string_arg() {
        let mut args = HashMap::new();
        args.insert("name".to_string(), json!("value"));

        assert_eq!(get_string_arg(&args, "name").unwrap(), "value");
        let err = get_string_arg(&args, "missing").unwrap_err();
        assert_eq!(err.code(), -32602);
    }

    #[test]
    fn test_structured_result() {
        let result = structured_result(&json!({"score": 85})).unwrap();
        assert!(!result.is_error);
        assert_eq!(result.structured_content, Some(json!({"score": 85})));

        let ContentBlock::Text { text } = &result.content[0];
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["score"], 85);
    }

    #[test]
    fn test_json_result_has_no_structured_content() {
        let result = json_result(&json!({"total": 6})).unwrap();
        assert!(result.structured_content.is_none());
    }
}
