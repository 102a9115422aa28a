//! Prometheus metrics for monitoring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics collector.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total requests processed
    pub requests_total: AtomicU64,
    /// Requests answered with a result
    pub requests_success: AtomicU64,
    /// Requests answered with an error
    pub requests_failed: AtomicU64,
    /// Notifications received
    pub notifications_total: AtomicU64,
    /// Tool calls
    pub tool_calls: AtomicU64,
    /// Messages rejected as unparseable
    pub parse_errors: AtomicU64,
    /// Active sessions
    pub active_sessions: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Increment requests total.
    pub fn inc_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment successful requests.
    pub fn inc_success(&self) {
        self.requests_success.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment failed requests.
    pub fn inc_failed(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment notifications.
    pub fn inc_notifications(&self) {
        self.notifications_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment tool calls.
    pub fn inc_tool_calls(&self) {
        self.tool_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment parse errors.
    pub fn inc_parse_errors(&self) {
        self.parse_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Set active sessions.
    pub fn set_active_sessions(&self, count: u64) {
        self.active_sessions.store(count, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_success: self.requests_success.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            notifications_total: self.notifications_total.load(Ordering::Relaxed),
            tool_calls: self.tool_calls.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
            active_sessions: self.active_sessions.load(Ordering::Relaxed),
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"# HELP design_system_mcp_requests_total Total number of requests
# TYPE design_system_mcp_requests_total counter
design_system_mcp_requests_total {}

# HELP design_system_mcp_requests_success Requests answered with a result
# TYPE design_system_mcp_requests_success counter
design_system_mcp_requests_success {}

# HELP design_system_mcp_requests_failed Requests answered with an error
# TYPE design_system_mcp_requests_failed counter
design_system_mcp_requests_failed {}

# HELP design_system_mcp_notifications_total Notifications received
# TYPE design_system_mcp_notifications_total counter
design_system_mcp_notifications_total {}

# HELP design_system_mcp_tool_calls Tool calls count
# TYPE design_system_mcp_tool_calls counter
design_system_mcp_tool_calls {}

# HELP design_system_mcp_parse_errors Messages rejected before dispatch
# TYPE design_system_mcp_parse_errors counter
design_system_mcp_parse_errors {}

# HELP design_system_mcp_active_sessions Sessions held by the HTTP transport
# TYPE design_system_mcp_active_sessions gauge
design_system_mcp_active_sessions {}
"#,
            s.requests_total,
            s.requests_success,
            s.requests_failed,
            s.notifications_total,
            s.tool_calls,
            s.parse_errors,
            s.active_sessions
        )
    }
}

/// Metrics snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub requests_success: u64,
    pub requests_failed: u64,
    pub notifications_total: u64,
    pub tool_calls: u64,
    pub parse_errors: u64,
    pub active_sessions: u64,
}

/// Timer for measuring durations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
