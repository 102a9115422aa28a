//! Per-client session state and the initialize lifecycle.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::mcp::protocol::{ClientInfo, MCP_VERSION, SUPPORTED_PROTOCOL_VERSIONS};

/// Session key used when an HTTP client sends no `Mcp-Session-Id` header.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Idle time after which a session may be evicted to make room.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Lifecycle of a session. There is no way back to `Uninitialized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Initialized,
}

/// RFC 5424 severities accepted by `logging/setLevel`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl LogLevel {
    pub const ALL: [LogLevel; 8] = [
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::Alert,
        Self::Emergency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Alert => "alert",
            Self::Emergency => "emergency",
        }
    }

    /// Parse a level name, rejecting anything outside the eight severities.
    pub fn parse(level: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == level)
            .ok_or_else(|| {
                let valid: Vec<_> = Self::ALL.iter().map(|l| l.as_str()).collect();
                Error::invalid_params(format!(
                    "Invalid log level '{}'. Valid levels: {}",
                    level,
                    valid.join(", ")
                ))
            })
    }
}

/// Pick the protocol version to answer `initialize` with.
pub fn negotiate_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|v| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|s| **s == v))
        .copied()
        .unwrap_or(MCP_VERSION)
}

/// State for one logical client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    state: LifecycleState,
    protocol_version: Option<String>,
    client_info: Option<ClientInfo>,
    log_level: LogLevel,
    last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: LifecycleState::Uninitialized,
            protocol_version: None,
            client_info: None,
            log_level: LogLevel::default(),
            last_seen: Utc::now(),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == LifecycleState::Initialized
    }

    pub fn protocol_version(&self) -> Option<&str> {
        self.protocol_version.as_deref()
    }

    pub fn client_info(&self) -> Option<&ClientInfo> {
        self.client_info.as_ref()
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// Complete `initialize`, returning the negotiated protocol version.
    ///
    /// On an already initialized session this changes nothing and returns the
    /// version negotiated the first time.
    pub fn initialize(
        &mut self,
        requested_version: Option<&str>,
        client_info: Option<ClientInfo>,
    ) -> String {
        if let (LifecycleState::Initialized, Some(version)) = (self.state, &self.protocol_version)
        {
            return version.clone();
        }

        let version = negotiate_version(requested_version).to_string();
        self.protocol_version = Some(version.clone());
        self.client_info = client_info;
        self.state = LifecycleState::Initialized;
        version
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    /// Record activity on the session.
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

/// Shared handle to a session; requests on the same session serialise on it.
pub type SharedSession = Arc<Mutex<Session>>;

/// Concurrent map of sessions keyed by client-supplied id.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, SharedSession>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions,
            idle_timeout,
        }
    }

    /// Fetch a session, creating it on first use.
    ///
    /// When the store is full, sessions idle for longer than the timeout are
    /// evicted first; a new key is refused only if none were.
    pub fn get_or_create(&self, id: &str) -> Result<SharedSession> {
        if let Some(existing) = self.sessions.get(id) {
            return Ok(existing.value().clone());
        }

        if self.sessions.len() >= self.max_sessions && self.evict_idle() == 0 {
            return Err(Error::InvalidRequest(format!(
                "Session limit reached ({} active sessions)",
                self.max_sessions
            )));
        }

        let session = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(id))))
            .value()
            .clone();
        Ok(session)
    }

    /// Drop every session not seen since `now - idle_timeout`. Returns the
    /// number of sessions removed.
    pub fn evict_idle(&self) -> usize {
        let cutoff = chrono::Duration::from_std(self.idle_timeout)
            .ok()
            .and_then(|timeout| Utc::now().checked_sub_signed(timeout));
        match cutoff {
            Some(cutoff) => self.evict_idle_since(cutoff),
            None => 0,
        }
    }

    fn evict_idle_since(&self, cutoff: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        // A locked session is serving a request, so it is not idle.
        self.sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => session.last_seen() >= cutoff,
            Err(_) => true,
        });
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            debug!("Evicted {} idle sessions", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(1024, DEFAULT_IDLE_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_uninitialized() {
        let session = Session::new("abc");
        assert_eq!(session.state(), LifecycleState::Uninitialized);
        assert!(!session.is_initialized());
        assert_eq!(session.log_level(), LogLevel::Info);
        assert!(session.protocol_version().is_none());
    }

    #[test]
    fn test_initialize_negotiates_version() {
        let mut session = Session::new("abc");
        let version = session.initialize(Some("2024-11-05"), None);
        assert_eq!(version, "2024-11-05");
        assert!(session.is_initialized());

        let mut other = Session::new("def");
        assert_eq!(other.initialize(Some("1999-01-01"), None), MCP_VERSION);

        let mut bare = Session::new("ghi");
        assert_eq!(bare.initialize(None, None), MCP_VERSION);
    }

    #[test]
    fn test_reinitialize_keeps_first_version() {
        let mut session = Session::new("abc");
        session.initialize(
            Some("2025-03-26"),
            Some(ClientInfo {
                name: "first".to_string(),
                version: "1".to_string(),
            }),
        );

        let version = session.initialize(
            Some("2025-06-18"),
            Some(ClientInfo {
                name: "second".to_string(),
                version: "2".to_string(),
            }),
        );

        assert_eq!(version, "2025-03-26");
        assert_eq!(session.client_info().map(|c| c.name.as_str()), Some("first"));
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("debug").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::parse("emergency").unwrap(), LogLevel::Emergency);

        let err = LogLevel::parse("invalid").unwrap_err();
        assert_eq!(err.code(), -32602);
        assert!(err.to_string().contains("debug, info, notice"));

        // Names are case-sensitive on the wire.
        assert!(LogLevel::parse("DEBUG").is_err());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Warning);
        assert!(LogLevel::Alert < LogLevel::Emergency);
    }

    #[tokio::test]
    async fn test_store_reuses_sessions() {
        let store = SessionStore::new(4, DEFAULT_IDLE_TIMEOUT);
        let a = store.get_or_create("a").unwrap();
        a.lock().await.initialize(None, None);

        let again = store.get_or_create("a").unwrap();
        assert!(again.lock().await.is_initialized());
        assert_eq!(store.len(), 1);

        let b = store.get_or_create("b").unwrap();
        assert!(!b.lock().await.is_initialized());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_capacity() {
        let store = SessionStore::new(1, DEFAULT_IDLE_TIMEOUT);
        store.get_or_create(DEFAULT_SESSION_ID).unwrap();
        assert!(store.get_or_create(DEFAULT_SESSION_ID).is_ok());

        let err = store.get_or_create("other").unwrap_err();
        assert_eq!(err.code(), -32600);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_store_evicts_idle_session_when_full() {
        let store = SessionStore::new(2, DEFAULT_IDLE_TIMEOUT);
        let a = store.get_or_create("a").unwrap();
        store.get_or_create("b").unwrap();
        a.lock().await.last_seen = Utc::now() - chrono::Duration::hours(1);

        let c = store.get_or_create("c").unwrap();
        assert!(!c.lock().await.is_initialized());
        assert_eq!(store.len(), 2);

        // "b" is still fresh, so a fourth key has nowhere to go.
        assert!(store.get_or_create("d").is_err());
        assert!(store.get_or_create("b").is_ok());
    }

    #[tokio::test]
    async fn test_store_keeps_busy_sessions() {
        let store = SessionStore::new(1, DEFAULT_IDLE_TIMEOUT);
        let a = store.get_or_create("a").unwrap();
        let mut guard = a.lock().await;
        guard.last_seen = Utc::now() - chrono::Duration::hours(1);

        assert!(store.get_or_create("b").is_err());
        drop(guard);
        assert!(store.get_or_create("b").is_ok());
    }

    #[test]
    fn test_evict_idle_leaves_fresh_sessions() {
        let store = SessionStore::new(8, DEFAULT_IDLE_TIMEOUT);
        store.get_or_create("a").unwrap();
        store.get_or_create("b").unwrap();
        assert_eq!(store.evict_idle(), 0);
        assert_eq!(store.len(), 2);
    }
}
