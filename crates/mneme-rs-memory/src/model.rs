//! Candidate, request, and search option models.

use serde::{Deserialize, Serialize};

/// One scored snippet returned by a search backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemorySearchResult {
    /// Snippet text.
    pub snippet: String,
    /// Relevance score, backend-defined range.
    pub score: f32,
    /// File path the snippet came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Free-form source identifier when there is no path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Line number within the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl MemorySearchResult {
    /// Create a result without location information.
    pub fn new(snippet: impl Into<String>, score: f32) -> Self {
        Self {
            snippet: snippet.into(),
            score,
            path: None,
            source: None,
            line: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Source identifier, preferring `path` over `source`. Blank values count
    /// as missing.
    pub fn location(&self) -> Option<&str> {
        [self.path.as_deref(), self.source.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|location| !location.is_empty())
    }
}

/// Options passed to [`crate::MemorySearch::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Number of results to request (already includes over-fetch headroom).
    pub max_results: usize,
    /// Relevance floor.
    pub min_score: f32,
    /// Session the turn belongs to, for backends that scope by session.
    pub session_key: Option<String>,
}

/// Input for a single recall invocation.
#[derive(Debug, Clone, Default)]
pub struct RecallRequest {
    /// Agent the turn runs for.
    pub agent_id: String,
    /// Incoming message; also used as the search query.
    pub message: String,
    /// Turn was triggered automatically (heartbeat or cron).
    pub is_heartbeat: bool,
    /// Path fragments already injected into the agent's permanent context.
    pub bootstrapped_paths: Vec<String>,
    /// Session key forwarded to the search backend.
    pub session_key: Option<String>,
}

impl RecallRequest {
    pub fn new(agent_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Mark the turn as heartbeat-triggered.
    pub fn heartbeat(mut self, is_heartbeat: bool) -> Self {
        self.is_heartbeat = is_heartbeat;
        self
    }

    pub fn with_bootstrapped_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bootstrapped_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }
}
