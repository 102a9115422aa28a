//! MCP Resources Support
//!
//! Three fixed `design-system://` documents, served as pretty-printed JSON.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::{COMPONENTS, DESIGN_SYSTEM};
use crate::error::{Error, Result};

const JSON_MIME: &str = "application/json";

/// A resource exposed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Resource contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub text: String,
}

/// Result of resources/list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResourcesResult {
    pub resources: Vec<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Result of resources/read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContents>,
}

/// The static documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticResource {
    AllComponents,
    Architecture,
    BrowserSupport,
}

impl StaticResource {
    pub const ALL: [StaticResource; 3] = [
        Self::AllComponents,
        Self::Architecture,
        Self::BrowserSupport,
    ];

    pub fn uri(self) -> &'static str {
        match self {
            Self::AllComponents => "design-system://components/all",
            Self::Architecture => "design-system://architecture",
            Self::BrowserSupport => "design-system://browser-support",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::AllComponents => "All Components",
            Self::Architecture => "System Architecture",
            Self::BrowserSupport => "Browser Support",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::AllComponents => "Complete documentation for all design system components",
            Self::Architecture => "Technical architecture and implementation details",
            Self::BrowserSupport => "Browser compatibility matrix and feature support",
        }
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.uri() == uri)
    }

    fn descriptor(self) -> Resource {
        Resource {
            uri: self.uri().to_string(),
            name: self.name().to_string(),
            description: Some(self.description().to_string()),
            mime_type: Some(JSON_MIME.to_string()),
        }
    }

    fn document(self) -> Result<Value> {
        let doc = match self {
            Self::AllComponents => json!({
                "components": &COMPONENTS[..],
                "systemInfo": DESIGN_SYSTEM,
                "totalComponents": COMPONENTS.len(),
            }),
            Self::Architecture => {
                let mut doc = serde_json::to_value(DESIGN_SYSTEM)?;
                if let Value::Object(ref mut map) = doc {
                    map.insert(
                        "technicalSpecs".to_string(),
                        json!({
                            "bundleSize": "~50KB minified",
                            "treeshaking": true,
                            "sideEffects": false,
                            "exports": ["esm", "cjs", "umd"],
                            "dependencies": [],
                            "peerDependencies": []
                        }),
                    );
                }
                doc
            }
            Self::BrowserSupport => json!({
                "supportMatrix": {
                    "Chrome": "54+",
                    "Firefox": "63+",
                    "Safari": "10.1+",
                    "Edge": "79+",
                    "IE": "Not supported"
                },
                "features": {
                    "Custom Elements": "Full support",
                    "Shadow DOM": "Full support",
                    "ES Modules": "Required",
                    "CSS Custom Properties": "Required"
                },
                "polyfills": {
                    "required": false,
                    "optional": ["@webcomponents/webcomponentsjs"]
                }
            }),
        };
        Ok(doc)
    }
}

/// Resource registry with cursor pagination.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    page_size: usize,
}

impl ResourceRegistry {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// All resource URIs in listing order.
    pub fn uris(&self) -> Vec<&'static str> {
        StaticResource::ALL.iter().map(|r| r.uri()).collect()
    }

    /// List one page of resources.
    ///
    /// The cursor is the end offset of the previous page, as a decimal string.
    pub fn list(&self, cursor: Option<&str>) -> Result<ListResourcesResult> {
        let total = StaticResource::ALL.len();
        let start = match cursor {
            None => 0,
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|offset| *offset <= total)
                .ok_or_else(|| Error::invalid_params(format!("Invalid cursor: {}", raw)))?,
        };
        let end = start.saturating_add(self.page_size).min(total);

        let resources = StaticResource::ALL[start..end]
            .iter()
            .map(|r| r.descriptor())
            .collect();
        let next_cursor = (end < total).then(|| end.to_string());

        Ok(ListResourcesResult {
            resources,
            next_cursor,
        })
    }

    /// Read a resource by URI.
    pub fn read(&self, uri: &str) -> Result<ReadResourceResult> {
        let resource = StaticResource::from_uri(uri)
            .ok_or_else(|| Error::ResourceNotFound(uri.to_string()))?;
        let text = serde_json::to_string_pretty(&resource.document()?)?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: Some(JSON_MIME.to_string()),
                text,
            }],
        })
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new(50)
    }
}
