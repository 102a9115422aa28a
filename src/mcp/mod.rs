//! Model Context Protocol (MCP) implementation.
//!
//! This module provides the JSON-RPC message handling, session lifecycle,
//! registries and stdio transport of the design system server.
//!
//! # Architecture
//!
//! - `protocol` - Core MCP types and message definitions
//! - `session` - Per-client lifecycle state and the HTTP session store
//! - `server` - Method router shared by all transports
//! - `handler` - Tool registry and argument helpers
//! - `resources`, `prompts`, `completion` - Static registries
//! - `transport` - Line-delimited stdio transport

pub mod completion;
pub mod handler;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod session;
pub mod transport;

pub use handler::McpHandler;
pub use protocol::*;
pub use server::McpServer;
pub use session::{Session, SessionStore};
pub use transport::{StdioTransport, Transport};
