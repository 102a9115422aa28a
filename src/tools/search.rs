//! Relevance-ranked component search.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::catalog::{Category, Complexity, Component, COMPONENTS};
use crate::error::{Error, Result};
use crate::mcp::handler::{parse_arguments, structured_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 50;

const KEY_WEIGHT: u32 = 10;
const NAME_WEIGHT: u32 = 8;
const DESCRIPTION_WEIGHT: u32 = 5;
const FEATURE_WEIGHT: u32 = 3;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    complexity: Option<Complexity>,
    #[serde(default)]
    limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchFilters {
    pub category: Option<Category>,
    pub complexity: Option<Complexity>,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub component: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub complexity: Complexity,
    pub relevance_score: f64,
    pub matched_fields: Vec<&'static str>,
    #[serde(skip)]
    raw_score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub filters: SearchFilters,
    pub matches: Vec<SearchMatch>,
    pub total_matches: usize,
}

/// Score one component against a lowercased query.
///
/// Examples make a component eligible without adding weight.
fn score(component: &'static Component, needle: &str) -> Option<SearchMatch> {
    let hit = |text: &str| text.to_lowercase().contains(needle);

    let mut raw_score = 0;
    let mut matched_fields = Vec::new();

    if hit(component.key) {
        raw_score += KEY_WEIGHT;
        matched_fields.push("id");
    }
    if hit(component.name) {
        raw_score += NAME_WEIGHT;
        matched_fields.push("name");
    }
    if hit(component.description) {
        raw_score += DESCRIPTION_WEIGHT;
        matched_fields.push("description");
    }

    let feature_hits = component.features.iter().filter(|f| hit(**f)).count() as u32;
    if feature_hits > 0 {
        raw_score += FEATURE_WEIGHT * feature_hits;
        matched_fields.push("features");
    }
    if component.examples.iter().any(|e| hit(*e)) {
        matched_fields.push("examples");
    }

    if matched_fields.is_empty() {
        return None;
    }

    Some(SearchMatch {
        component: component.key,
        name: component.name,
        description: component.description,
        category: component.category,
        complexity: component.complexity,
        relevance_score: f64::from(raw_score) / 10.0,
        matched_fields,
        raw_score,
    })
}

/// Run a search over the catalog.
pub fn search(
    query: &str,
    category: Option<Category>,
    complexity: Option<Complexity>,
    limit: Option<u64>,
) -> Result<SearchResults> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(Error::invalid_params("query must be a non-empty string"));
    }

    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(Error::invalid_params(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )));
    }

    let mut matches: Vec<SearchMatch> = COMPONENTS
        .iter()
        .filter(|c| category.map_or(true, |cat| c.category == cat))
        .filter(|c| complexity.map_or(true, |cx| c.complexity == cx))
        .filter_map(|c| score(c, &needle))
        .collect();

    // Stable sort keeps catalog order among equal scores.
    matches.sort_by(|a, b| b.raw_score.cmp(&a.raw_score));

    let total_matches = matches.len();
    matches.truncate(limit as usize);

    Ok(SearchResults {
        query: query.to_string(),
        filters: SearchFilters {
            category,
            complexity,
            limit,
        },
        matches,
        total_matches,
    })
}

/// Search components tool.
pub struct SearchComponentsTool;

impl SearchComponentsTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SearchComponentsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for SearchComponentsTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "search_components".to_string(),
            description: "Searches components by keyword across names, descriptions, features and use cases, ranked by relevance".to_string(),
            input_schema: crate::tool_schema! {
                required: ["query"],
                "query": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Case-insensitive search text"
                },
                "category": {
                    "type": "string",
                    "enum": Category::ALL.map(Category::as_str),
                    "description": "Only return components in this category"
                },
                "complexity": {
                    "type": "string",
                    "enum": Complexity::ALL.map(Complexity::as_str),
                    "description": "Only return components of this complexity"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_LIMIT,
                    "default": DEFAULT_LIMIT,
                    "description": "Maximum number of matches to return"
                }
            },
            output_schema: Some(json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" },
                    "filters": { "type": "object" },
                    "matches": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "component": { "type": "string" },
                                "name": { "type": "string" },
                                "description": { "type": "string" },
                                "category": { "type": "string" },
                                "complexity": { "type": "string" },
                                "relevance_score": { "type": "number" },
                                "matched_fields": { "type": "array", "items": { "type": "string" } }
                            }
                        }
                    },
                    "total_matches": { "type": "integer" }
                },
                "required": ["query", "matches", "total_matches"]
            })),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let args: SearchArgs = parse_arguments(args)?;
        let results = search(&args.query, args.category, args.complexity, args.limit)?;
        structured_result(&results)
    }
}
