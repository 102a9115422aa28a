//! Configuration management for the design system MCP server.

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound for `--resource-page-size`.
pub const MAX_RESOURCE_PAGE_SIZE: usize = 1000;

/// Command-line arguments for the design system MCP server.
#[derive(Parser, Debug, Clone)]
#[command(name = "design-system-mcp")]
#[command(author = "Sample Design System Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server exposing Sample Design System components to AI assistants")]
pub struct Args {
    /// Transport mode: http or stdio
    #[arg(short, long, default_value = "http", env = "DESIGN_SYSTEM_MCP_TRANSPORT")]
    pub transport: Transport,

    /// Address to bind (only for http transport)
    #[arg(long, default_value = "127.0.0.1", env = "DESIGN_SYSTEM_MCP_HOST")]
    pub host: String,

    /// HTTP port (only for http transport)
    #[arg(short, long, default_value = "3000", env = "DESIGN_SYSTEM_MCP_PORT")]
    pub port: u16,

    /// Path of the MCP endpoint
    #[arg(long, default_value = "/mcp", env = "DESIGN_SYSTEM_MCP_ENDPOINT")]
    pub endpoint: String,

    /// Enable debug logging
    #[arg(short, long, env = "DESIGN_SYSTEM_MCP_DEBUG")]
    pub debug: bool,

    /// Log output format
    #[arg(long, default_value = "text", env = "DESIGN_SYSTEM_MCP_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Maximum number of concurrent HTTP sessions
    #[arg(long, default_value = "1024", env = "DESIGN_SYSTEM_MCP_MAX_SESSIONS")]
    pub max_sessions: usize,

    /// Seconds a session may sit idle before it can be evicted
    #[arg(long, default_value = "1800", env = "DESIGN_SYSTEM_MCP_SESSION_IDLE_SECS")]
    pub session_idle_secs: u64,

    /// Maximum request body size (bytes)
    #[arg(long, default_value = "1048576", env = "DESIGN_SYSTEM_MCP_MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Page size for resources/list
    #[arg(long, default_value = "50", env = "DESIGN_SYSTEM_MCP_RESOURCE_PAGE_SIZE")]
    pub resource_page_size: usize,

    /// Expose Prometheus metrics at /metrics
    #[arg(long, env = "DESIGN_SYSTEM_MCP_METRICS")]
    pub metrics: bool,
}

/// Transport mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Http,
    Stdio,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Transport mode
    pub transport: Transport,
    /// Bind address
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// MCP endpoint path
    pub endpoint: String,
    /// Debug mode
    pub debug: bool,
    /// Log format
    pub log_format: LogFormat,
    /// Session cap for the HTTP transport
    pub max_sessions: usize,
    /// Idle seconds before a session can be evicted
    pub session_idle_secs: u64,
    /// Request body limit
    pub max_body_bytes: usize,
    /// resources/list page size
    pub resource_page_size: usize,
    /// Metrics enabled
    pub metrics: bool,
}

impl Config {
    /// Check values clap cannot constrain on its own.
    pub fn validate(&self) -> Result<()> {
        if !self.endpoint.starts_with('/') {
            return Err(Error::Config(format!(
                "endpoint must start with '/', got '{}'",
                self.endpoint
            )));
        }
        if self.max_sessions == 0 {
            return Err(Error::Config("max_sessions must be at least 1".to_string()));
        }
        if self.session_idle_secs == 0 {
            return Err(Error::Config(
                "session_idle_secs must be at least 1".to_string(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(Error::Config("max_body_bytes must be at least 1".to_string()));
        }
        if !(1..=MAX_RESOURCE_PAGE_SIZE).contains(&self.resource_page_size) {
            return Err(Error::Config(format!(
                "resource_page_size must be between 1 and {}, got {}",
                MAX_RESOURCE_PAGE_SIZE, self.resource_page_size
            )));
        }
        Ok(())
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            transport: args.transport,
            host: args.host,
            port: args.port,
            endpoint: args.endpoint,
            debug: args.debug,
            log_format: args.log_format,
            max_sessions: args.max_sessions,
            session_idle_secs: args.session_idle_secs,
            max_body_bytes: args.max_body_bytes,
            resource_page_size: args.resource_page_size,
            metrics: args.metrics,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: Transport::Http,
            host: "127.0.0.1".to_string(),
            port: 3000,
            endpoint: "/mcp".to_string(),
            debug: false,
            log_format: LogFormat::Text,
            max_sessions: 1024,
            session_idle_secs: 1800,
            max_body_bytes: 1024 * 1024,
            resource_page_size: 50,
            metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_default() {
        assert_eq!(Transport::default(), Transport::Http);
    }

    #[test]
    fn test_transport_serialization() {
        let transports = [
            (Transport::Stdio, "\"stdio\""),
            (Transport::Http, "\"http\""),
        ];

        for (transport, expected) in &transports {
            let json = serde_json::to_string(transport).unwrap();
            assert_eq!(json, *expected);
        }
    }

    #[test]
    fn test_transport_deserialization() {
        let stdio: Transport = serde_json::from_str("\"stdio\"").unwrap();
        assert_eq!(stdio, Transport::Stdio);

        let http: Transport = serde_json::from_str("\"http\"").unwrap();
        assert_eq!(http, Transport::Http);
    }

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.transport, Transport::Http);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.endpoint, "/mcp");
        assert!(!config.debug);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.max_sessions, 1024);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.resource_page_size, 50);
        assert!(!config.metrics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = Config {
            endpoint: "mcp".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = Config {
            max_sessions: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            resource_page_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            resource_page_size: usize::MAX,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = Config {
            resource_page_size: MAX_RESOURCE_PAGE_SIZE,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            transport: Transport::Stdio,
            port: 8080,
            debug: true,
            ..Config::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"transport\":\"stdio\""));
        assert!(json.contains("\"port\":8080"));
        assert!(json.contains("\"debug\":true"));
        assert!(json.contains("\"log_format\":\"text\""));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "design-system-mcp",
            "--transport",
            "stdio",
            "--port",
            "4000",
            "--endpoint",
            "/rpc",
            "--log-format",
            "json",
            "--metrics",
            "--session-idle-secs",
            "60",
        ])
        .unwrap();

        let config: Config = args.into();

        assert_eq!(config.transport, Transport::Stdio);
        assert_eq!(config.port, 4000);
        assert_eq!(config.endpoint, "/rpc");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.metrics);
        assert_eq!(config.session_idle_secs, 60);
    }

    #[test]
    fn test_args_reject_unknown_transport() {
        let result = Args::try_parse_from(["design-system-mcp", "--transport", "sse"]);
        assert!(result.is_err());
    }
}
