//! HTTP transport for MCP.
//!
//! One endpoint takes JSON-RPC messages by `POST`. JSON-RPC errors travel in
//! the body with status 200; only a wrong HTTP verb changes the status.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::mcp::protocol::{extract_id, JsonRpcResponse};
use crate::mcp::server::McpServer;
use crate::mcp::session::{SessionStore, DEFAULT_SESSION_ID};

/// Header carrying the client's session key.
pub const SESSION_HEADER: HeaderName = HeaderName::from_static("mcp-session-id");

const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// HTTP server state.
#[derive(Clone)]
pub struct HttpState {
    server: Arc<McpServer>,
    sessions: Arc<SessionStore>,
}

/// Build the application router.
pub fn router(config: &Config, server: Arc<McpServer>) -> Router {
    let state = HttpState {
        server,
        sessions: Arc::new(SessionStore::new(
            config.max_sessions,
            Duration::from_secs(config.session_idle_secs),
        )),
    };

    let mut app = Router::new()
        .route(
            &config.endpoint,
            post(handle_message)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_check));

    if config.metrics {
        app = app.route("/metrics", get(metrics));
    }

    app.layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and serve until Ctrl+C or SIGTERM.
pub async fn start_server(config: &Config, server: Arc<McpServer>) -> Result<()> {
    let app = router(config, server);

    let addr = config.bind_address();
    info!("Starting HTTP server on http://{}{}", addr, config.endpoint);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::HttpServer(e.to_string()))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// MCP endpoint.
async fn handle_message(State(state): State<HttpState>, headers: HeaderMap, body: Bytes) -> Response {
    let echoed = headers.get(&SESSION_HEADER).cloned();
    let session_id = echoed
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_SESSION_ID);

    let lookup = state.sessions.get_or_create(session_id);
    state
        .server
        .metrics()
        .set_active_sessions(state.sessions.len() as u64);

    let reply = match lookup {
        Ok(session) => {
            let mut session = session.lock().await;
            state.server.handle_bytes(&mut session, &body).await
        }
        Err(e) => {
            warn!(session = %session_id, "Refusing message: {}", e);
            match serde_json::from_slice::<Value>(&body) {
                // Notifications never get a body, even when refused.
                Ok(Value::Object(obj)) if !obj.contains_key("id") => None,
                Ok(value) => Some(JsonRpcResponse::from_error(extract_id(&value), &e)),
                Err(_) => Some(JsonRpcResponse::from_error(None, &e)),
            }
        }
    };

    let mut response = match reply {
        Some(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        None => StatusCode::OK.into_response(),
    };

    if let Some(value) = echoed {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

/// CORS preflight.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any verb other than POST or OPTIONS on the MCP endpoint.
async fn method_not_allowed() -> Response {
    let envelope = JsonRpcResponse::from_error(
        None,
        &Error::InvalidRequest("Method not allowed. MCP requires POST requests.".to_string()),
    );

    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
        Json(envelope),
    )
        .into_response()
}

/// Health check endpoint.
async fn health_check(State(state): State<HttpState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "name": state.server.name(),
        "version": crate::VERSION,
        "sessions": state.sessions.len()
    }))
}

/// Prometheus metrics endpoint.
async fn metrics(State(state): State<HttpState>) -> impl IntoResponse {
    let metrics = state.server.metrics();
    metrics.set_active_sessions(state.sessions.len() as u64);

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.to_prometheus(),
    )
}
