//! Error types for the design system MCP server.

use thiserror::Error;

use crate::mcp::protocol::error_codes;

/// Result type alias for design system MCP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the server.
#[derive(Error, Debug)]
pub enum Error {
    // ===== Protocol Errors =====
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Server not initialized")]
    NotInitialized,

    #[error("Method '{0}' not found")]
    MethodNotFound(String),

    #[error("{0}")]
    InvalidParams(String),

    // ===== Registry Errors =====
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    #[error("Unknown prompt: {0}")]
    PromptNotFound(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    // ===== I/O Errors =====
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ===== Server Errors =====
    #[error("HTTP server error: {0}")]
    HttpServer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for an invalid-params error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    /// The JSON-RPC error code this error is reported with.
    pub fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => error_codes::PARSE_ERROR,
            Self::InvalidRequest(_) | Self::NotInitialized => error_codes::INVALID_REQUEST,
            Self::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            Self::InvalidParams(_) | Self::ToolNotFound(_) | Self::PromptNotFound(_) => {
                error_codes::INVALID_PARAMS
            }
            Self::ResourceNotFound(_) => error_codes::RESOURCE_NOT_FOUND,
            Self::Io(_)
            | Self::Json(_)
            | Self::HttpServer(_)
            | Self::Config(_)
            | Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Whether this error is the client's fault (bad input) rather than ours.
    pub fn is_client_error(&self) -> bool {
        self.code() != error_codes::INTERNAL_ERROR
    }
}
