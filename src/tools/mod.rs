//! MCP tool implementations.
//!
//! The design system exposes 6 tools organized by concern:
//!
//! - `components` - Catalog listing and per-component details (2 tools)
//! - `guide` - Framework guides and the architecture overview (2 tools)
//! - `search` - Relevance-ranked component search (1 tool)
//! - `validate` - Rule-based usage validation (1 tool)

pub mod components;
pub mod guide;
pub mod search;
pub mod validate;

use crate::mcp::handler::McpHandler;

/// Register all tools with the handler.
///
/// Registration order is the order `tools/list` reports.
pub fn register_all_tools(handler: &mut McpHandler) {
    // Catalog tools (2)
    handler.register(components::ListComponentsTool::new());
    handler.register(components::GetComponentInfoTool::new());

    // Guide tools (2)
    handler.register(guide::GetImplementationGuideTool::new());
    handler.register(guide::GetSystemArchitectureTool::new());

    // Search and validation (2)
    handler.register(search::SearchComponentsTool::new());
    handler.register(validate::ValidateComponentUsageTool::new());
}
