//! Sample Design System MCP Server
//!
//! A Model Context Protocol (MCP) server that lets AI assistants discover,
//! search and validate the web components of the Sample Design System.
//!
//! # Architecture
//!
//! The server is split into four layers:
//!
//! 1. **Catalog** (`catalog`) - Static component table and design system metadata
//! 2. **MCP Layer** (`mcp`) - JSON-RPC codec, session lifecycle, method router, registries
//! 3. **Tools Layer** (`tools`) - The 6 MCP tools built on the catalog
//! 4. **Transports** (`http`, `mcp::transport`) - HTTP POST endpoint and line-delimited stdio
//!
//! # Features
//!
//! - **Component discovery**: list, describe and search components
//! - **Framework guides**: setup instructions for vanilla, React, Vue, Angular and Svelte
//! - **Usage validation**: rule-based scoring of snippets for correctness and accessibility
//! - **Resources and prompts**: static documents and prompt templates with completion

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod metrics;
pub mod tools;

pub use error::{Error, Result};

/// Server version reported in `serverInfo`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name reported in `serverInfo`.
pub const SERVER_NAME: &str = "sample-design-system-mcp";
