//! Component catalog tools.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::catalog::{self, Category, Complexity, Component, COMPONENTS, DESIGN_SYSTEM};
use crate::error::{Error, Result};
use crate::mcp::handler::{get_string_arg, json_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};

#[derive(Debug, Serialize)]
struct ComponentSummary {
    id: &'static str,
    name: &'static str,
    tag: &'static str,
    description: &'static str,
    features: &'static [&'static str],
    category: Category,
    complexity: Complexity,
}

impl From<&'static Component> for ComponentSummary {
    fn from(c: &'static Component) -> Self {
        Self {
            id: c.key,
            name: c.name,
            tag: c.tag,
            description: c.description,
            features: c.features,
            category: c.category,
            complexity: c.complexity,
        }
    }
}

#[derive(Debug, Serialize)]
struct ComponentList {
    components: Vec<ComponentSummary>,
    total_components: usize,
}

#[derive(Debug, Serialize)]
struct Installation {
    npm: String,
    import: String,
    cdn: String,
}

#[derive(Debug, Serialize)]
struct ComponentDetails {
    #[serde(flatten)]
    component: &'static Component,
    installation: Installation,
}

impl From<&'static Component> for ComponentDetails {
    fn from(component: &'static Component) -> Self {
        Self {
            component,
            installation: Installation {
                npm: DESIGN_SYSTEM.installation.to_string(),
                import: format!("import '{}';", component.import_path()),
                cdn: format!(
                    r#"<script type="module" src="{}"></script>"#,
                    component.cdn_url()
                ),
            },
        }
    }
}

/// Resolve a component key, listing the valid keys on failure.
pub fn resolve_component(key: &str) -> Result<&'static Component> {
    catalog::component(key).ok_or_else(|| {
        Error::invalid_params(format!(
            "Unknown component '{}'. Valid components: {}",
            key,
            catalog::component_key_list()
        ))
    })
}

/// List every component in the design system.
pub struct ListComponentsTool;

impl ListComponentsTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListComponentsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for ListComponentsTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "list_components".to_string(),
            description: "Lists all available components in the Sample Design System with their descriptions, categories and key features".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            output_schema: None,
        }
    }

    async fn execute(&self, _args: HashMap<String, Value>) -> Result<ToolResult> {
        let components: Vec<ComponentSummary> = COMPONENTS.iter().map(Into::into).collect();
        json_result(&ComponentList {
            total_components: components.len(),
            components,
        })
    }
}

/// Detailed information about one component.
pub struct GetComponentInfoTool;

impl GetComponentInfoTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GetComponentInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for GetComponentInfoTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "get_component_info".to_string(),
            description: "Gets detailed information about a specific component including usage examples, properties, and installation snippets".to_string(),
            input_schema: crate::tool_schema! {
                required: ["component"],
                "component": {
                    "type": "string",
                    "description": "The component key to look up",
                    "enum": catalog::component_keys()
                }
            },
            output_schema: None,
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let key = get_string_arg(&args, "component")?;
        let component = resolve_component(&key)?;
        json_result(&ComponentDetails::from(component))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::ContentBlock;
    use serde_json::json;

    fn text_json(result: &ToolResult) -> Value {
        let ContentBlock::Text { text } = &result.content[0];
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_list_components() {
        let result = ListComponentsTool::new().execute(HashMap::new()).await.unwrap();
        assert!(!result.is_error);

        let doc = text_json(&result);
        assert_eq!(doc["total_components"], 6);
        let ids: Vec<_> = doc["components"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["accordion", "button", "card", "alert", "modal", "breadcrumb"]
        );
        assert_eq!(doc["components"][1]["category"], "action");
        assert!(doc["components"][0]["features"].is_array());
    }

    #[tokio::test]
    async fn test_get_component_info() {
        let mut args = HashMap::new();
        args.insert("component".to_string(), json!("Button"));

        let result = GetComponentInfoTool::new().execute(args).await.unwrap();
        let doc = text_json(&result);
        assert_eq!(doc["id"], "button");
        assert_eq!(doc["tag"], "sample-button");
        assert!(doc["usage"].as_str().unwrap().contains("<sample-button"));
        assert!(doc["props"].is_array());
        assert_eq!(
            doc["installation"]["npm"],
            "npm install sample-design-system-educkf"
        );
        assert!(doc["installation"]["import"]
            .as_str()
            .unwrap()
            .contains("sample-design-system-educkf/components/sample-button"));
    }

    #[tokio::test]
    async fn test_get_component_info_unknown() {
        let mut args = HashMap::new();
        args.insert("component".to_string(), json!("carousel"));

        let err = GetComponentInfoTool::new().execute(args).await.unwrap_err();
        assert_eq!(err.code(), -32602);
        assert_eq!(
            err.to_string(),
            "Unknown component 'carousel'. Valid components: accordion, button, card, alert, modal, breadcrumb"
        );
    }

    #[tokio::test]
    async fn test_get_component_info_missing_argument() {
        let err = GetComponentInfoTool::new()
            .execute(HashMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), -32602);
    }

    #[test]
    fn test_definition_lists_component_keys() {
        let tool = GetComponentInfoTool::new().definition();
        assert_eq!(tool.input_schema["required"], json!(["component"]));
        assert_eq!(
            tool.input_schema["properties"]["component"]["enum"]
                .as_array()
                .unwrap()
                .len(),
            6
        );
    }
}
