//! MCP server implementation.
//!
//! `McpServer` is the single method router shared by every transport. It owns
//! the read-only registries; mutable state lives in the [`Session`] each call
//! is given.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::mcp::completion::{self, CompleteParams};
use crate::mcp::handler::McpHandler;
use crate::mcp::prompts::{ListPromptsResult, PromptRegistry};
use crate::mcp::protocol::*;
use crate::mcp::resources::ResourceRegistry;
use crate::mcp::session::{LogLevel, Session};
use crate::mcp::transport::Transport;
use crate::metrics::{Metrics, Timer};
use crate::VERSION;

/// Usage hints returned from `initialize`.
pub const SERVER_INSTRUCTIONS: &str = "Use list_components or search_components to find a component, \
get_component_info for its props and usage, get_implementation_guide for framework setup, and \
validate_component_usage to check generated code.";

/// Session id used by the stdio transport.
pub const STDIO_SESSION_ID: &str = "stdio";

/// Deserialize method params, reporting failures as InvalidParams.
fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| Error::invalid_params(format!("Invalid params: {e}")))
}

/// MCP server.
pub struct McpServer {
    handler: Arc<McpHandler>,
    prompts: Arc<PromptRegistry>,
    resources: Arc<ResourceRegistry>,
    metrics: Arc<Metrics>,
    name: String,
    version: String,
}

impl McpServer {
    /// Create a new MCP server with the built-in prompts and resources.
    pub fn new(handler: McpHandler, name: impl Into<String>) -> Self {
        Self::with_features(
            handler,
            PromptRegistry::new(),
            ResourceRegistry::default(),
            Metrics::new(),
            name,
        )
    }

    /// Create a new MCP server from explicit registries.
    pub fn with_features(
        handler: McpHandler,
        prompts: PromptRegistry,
        resources: ResourceRegistry,
        metrics: Arc<Metrics>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
            prompts: Arc::new(prompts),
            resources: Arc::new(resources),
            metrics,
            name: name.into(),
            version: VERSION.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Run the server with the given transport.
    ///
    /// One session lives for the whole connection.
    pub async fn run<T: Transport>(&self, mut transport: T) -> Result<()> {
        info!("Starting MCP server: {} v{}", self.name, self.version);

        let (mut incoming, outgoing) = transport.start().await?;
        let mut session = Session::new(STDIO_SESSION_ID);

        while let Some(line) = incoming.recv().await {
            if let Some(response) = self.handle_line(&mut session, &line).await {
                if outgoing.send(response).await.is_err() {
                    error!("Failed to send response");
                    break;
                }
            }
        }

        drop(outgoing);
        transport.stop().await?;
        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_line(&self, session: &mut Session, line: &str) -> Option<JsonRpcResponse> {
        self.handle_bytes(session, line.as_bytes()).await
    }

    /// Handle one raw message body. Returns `None` for notifications.
    pub async fn handle_bytes(&self, session: &mut Session, body: &[u8]) -> Option<JsonRpcResponse> {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.handle_value(session, value).await,
            Err(e) => {
                warn!(session = %session.id, "Rejecting unparseable message: {}", e);
                self.metrics.inc_parse_errors();
                Some(JsonRpcResponse::from_error(
                    None,
                    &Error::Parse(format!("Invalid JSON: {e}")),
                ))
            }
        }
    }

    /// Handle one decoded message. Returns `None` for notifications.
    pub async fn handle_value(&self, session: &mut Session, value: Value) -> Option<JsonRpcResponse> {
        session.touch();

        match IncomingMessage::classify(value) {
            Ok(IncomingMessage::Request(req)) => Some(self.handle_request(session, req).await),
            Ok(IncomingMessage::Notification(notif)) => {
                self.handle_notification(session, notif);
                None
            }
            Err(rejected) => {
                warn!(session = %session.id, "Rejecting message: {}", rejected.error);
                if rejected.error.code() == error_codes::PARSE_ERROR {
                    self.metrics.inc_parse_errors();
                }
                Some(rejected.into_response())
            }
        }
    }

    /// Handle a JSON-RPC request.
    async fn handle_request(&self, session: &mut Session, req: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %req.method, id = %req.id, session = %session.id, "Handling request");
        self.metrics.inc_requests();
        let timer = Timer::start();

        let params = req.params.unwrap_or_else(|| Value::Object(Map::new()));
        let result = self.dispatch(session, &req.method, params).await;

        match result {
            Ok(value) => {
                self.metrics.inc_success();
                debug!(method = %req.method, elapsed_ms = timer.elapsed_ms(), "Request completed");
                JsonRpcResponse::success(req.id, value)
            }
            Err(e) => {
                self.metrics.inc_failed();
                if e.is_client_error() {
                    debug!(method = %req.method, code = e.code(), "Request failed: {}", e);
                } else {
                    error!(method = %req.method, "Request failed: {}", e);
                }
                JsonRpcResponse::from_error(Some(req.id), &e)
            }
        }
    }

    /// Route a request to its handler.
    ///
    /// Unknown methods are reported before the lifecycle gate.
    async fn dispatch(&self, session: &mut Session, method: &str, params: Value) -> Result<Value> {
        let method =
            Method::parse(method).ok_or_else(|| Error::MethodNotFound(method.to_string()))?;

        if method.requires_initialization() && !session.is_initialized() {
            return Err(Error::NotInitialized);
        }

        match method {
            // Core
            Method::Initialize => self.handle_initialize(session, params),
            Method::Ping => Ok(json!({})),
            // Tools
            Method::ToolsList => self.handle_list_tools(),
            Method::ToolsCall => self.handle_call_tool(params).await,
            // Resources
            Method::ResourcesList => self.handle_list_resources(params),
            Method::ResourcesRead => self.handle_read_resource(params),
            // Prompts
            Method::PromptsList => self.handle_list_prompts(),
            Method::PromptsGet => self.handle_get_prompt(params),
            // Completions
            Method::CompletionComplete => self.handle_completion(params),
            // Logging
            Method::LoggingSetLevel => self.handle_set_level(session, params),
        }
    }

    /// Handle a notification.
    fn handle_notification(&self, session: &mut Session, notif: JsonRpcNotification) {
        debug!(method = %notif.method, session = %session.id, "Handling notification");
        self.metrics.inc_notifications();

        match NotificationKind::parse(&notif.method) {
            NotificationKind::Initialized => {
                if session.is_initialized() {
                    info!(session = %session.id, "Client initialized");
                } else {
                    warn!(session = %session.id, "Client sent initialized before initialize");
                }
            }
            NotificationKind::Cancelled => {
                // Requests complete before the next message is read.
                debug!("Ignoring cancellation, no request in flight");
            }
            NotificationKind::ToolsListChanged => {
                debug!("Client reported a tools list change");
            }
            NotificationKind::Unknown => {
                debug!("Unknown notification: {}", notif.method);
            }
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&self, session: &mut Session, params: Value) -> Result<Value> {
        let params: InitializeParams = parse_params(params)?;

        let reinitialize = session.is_initialized();
        debug!(
            session = %session.id,
            capabilities = ?params.capabilities.keys().collect::<Vec<_>>(),
            "Client capabilities"
        );
        let version = session.initialize(params.protocol_version.as_deref(), params.client_info);

        if reinitialize {
            info!(session = %session.id, "Session already initialized, re-affirming {}", version);
        } else {
            info!(
                session = %session.id,
                client = session.client_info().map(|c| c.name.as_str()).unwrap_or("unknown"),
                "Session initialized with protocol {}",
                version
            );
        }

        let result = InitializeResult {
            protocol_version: version,
            capabilities: ServerCapabilities::full(),
            server_info: ServerInfo {
                name: self.name.clone(),
                version: self.version.clone(),
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle list tools request.
    fn handle_list_tools(&self) -> Result<Value> {
        let tools = self.handler.list_tools();
        let result = ListToolsResult { tools };
        Ok(serde_json::to_value(result)?)
    }

    /// Handle call tool request.
    async fn handle_call_tool(&self, params: Value) -> Result<Value> {
        let params: CallToolParams = parse_params(params)?;

        let name = params
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::invalid_params("Tool name is required"))?;

        let handler = self
            .handler
            .get_tool(&name)
            .ok_or_else(|| Error::ToolNotFound(name.clone()))?;

        let arguments: HashMap<String, Value> =
            params.arguments.unwrap_or_default().into_iter().collect();

        self.metrics.inc_tool_calls();
        debug!(tool = %name, "Calling tool");

        let result = handler.execute(arguments).await?;
        Ok(serde_json::to_value(result)?)
    }

    /// Handle list resources request.
    fn handle_list_resources(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct ListParams {
            #[serde(default)]
            cursor: Option<String>,
        }

        let params: ListParams = parse_params(params)?;
        let result = self.resources.list(params.cursor.as_deref())?;
        Ok(serde_json::to_value(result)?)
    }

    /// Handle read resource request.
    fn handle_read_resource(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct ReadParams {
            #[serde(default)]
            uri: Option<String>,
        }

        let params: ReadParams = parse_params(params)?;
        let uri = params
            .uri
            .ok_or_else(|| Error::invalid_params("Missing required parameter: uri"))?;

        let result = self.resources.read(&uri)?;
        Ok(serde_json::to_value(result)?)
    }

    /// Handle list prompts request.
    fn handle_list_prompts(&self) -> Result<Value> {
        let result = ListPromptsResult {
            prompts: self.prompts.list(),
            next_cursor: None,
        };
        Ok(serde_json::to_value(result)?)
    }

    /// Handle get prompt request.
    fn handle_get_prompt(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct GetPromptParams {
            #[serde(default)]
            name: Option<String>,
            #[serde(default)]
            arguments: HashMap<String, String>,
        }

        let params: GetPromptParams = parse_params(params)?;
        let name = params
            .name
            .ok_or_else(|| Error::invalid_params("Missing required parameter: name"))?;

        let result = self
            .prompts
            .get(&name, &params.arguments)
            .ok_or(Error::PromptNotFound(name))?;

        Ok(serde_json::to_value(result)?)
    }

    /// Handle completion request.
    fn handle_completion(&self, params: Value) -> Result<Value> {
        let params: CompleteParams = parse_params(params)?;
        let result = completion::complete(&params, &self.prompts, &self.resources)?;
        Ok(serde_json::to_value(result)?)
    }

    /// Handle logging/setLevel. Only the session's recorded level changes.
    fn handle_set_level(&self, session: &mut Session, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct SetLevelParams {
            #[serde(default)]
            level: Option<String>,
        }

        let params: SetLevelParams = parse_params(params)?;
        let level = params
            .level
            .ok_or_else(|| Error::invalid_params("Missing required parameter: level"))?;

        let level = LogLevel::parse(&level)?;
        session.set_log_level(level);
        info!(session = %session.id, "Log level set to {}", level.as_str());

        Ok(json!({}))
    }
}
