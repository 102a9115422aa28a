//! MCP transport layer implementations.
//!
//! Line-delimited JSON over stdin/stdout. The HTTP transport lives in
//! [`crate::http`].

use async_trait::async_trait;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

use crate::error::{Error, Result};
use crate::mcp::protocol::JsonRpcResponse;

/// Transport trait for MCP communication.
///
/// Incoming messages are handed over as raw lines so that the server can
/// report malformed JSON itself.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start the transport, returning channels for messages.
    async fn start(&mut self) -> Result<(mpsc::Receiver<String>, mpsc::Sender<JsonRpcResponse>)>;

    /// Stop the transport, flushing anything still queued for output.
    async fn stop(&mut self) -> Result<()>;
}

/// Stdio transport for MCP.
pub struct StdioTransport {
    writer: Option<JoinHandle<()>>,
}

impl StdioTransport {
    /// Create a new stdio transport.
    pub fn new() -> Self {
        Self { writer: None }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn start(&mut self) -> Result<(mpsc::Receiver<String>, mpsc::Sender<JsonRpcResponse>)> {
        // Channel for incoming lines (from stdin)
        let (incoming_tx, incoming_rx) = mpsc::channel::<String>(100);
        // Channel for outgoing responses (to stdout)
        let (outgoing_tx, mut outgoing_rx) = mpsc::channel::<JsonRpcResponse>(100);

        // Spawn stdin reader task
        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let mut reader = BufReader::new(stdin);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        debug!("EOF on stdin, stopping transport");
                        break;
                    }
                    Ok(_) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }

                        trace!("Received: {}", trimmed);
                        if incoming_tx.send(trimmed.to_string()).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        // Spawn stdout writer task
        self.writer = Some(tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();

            while let Some(response) = outgoing_rx.recv().await {
                match serde_json::to_string(&response) {
                    Ok(s) => {
                        trace!("Sending: {}", s);
                        if let Err(e) = stdout.write_all(s.as_bytes()).await {
                            error!("Error writing to stdout: {}", e);
                            break;
                        }
                        if let Err(e) = stdout.write_all(b"\n").await {
                            error!("Error writing newline: {}", e);
                            break;
                        }
                        if let Err(e) = stdout.flush().await {
                            error!("Error flushing stdout: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Error serializing response: {}", e);
                    }
                }
            }
        }));

        Ok((incoming_rx, outgoing_tx))
    }

    async fn stop(&mut self) -> Result<()> {
        // The writer drains once every sender has been dropped.
        if let Some(writer) = self.writer.take() {
            writer
                .await
                .map_err(|e| Error::Internal(format!("stdout writer task failed: {e}")))?;
        }
        Ok(())
    }
}
