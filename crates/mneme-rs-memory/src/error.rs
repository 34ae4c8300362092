//! Error types for memory recall.

/// Errors returned by search backends.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The backend could not hand out a search handle.
    #[error("search manager unavailable: {0}")]
    Unavailable(String),
    /// The search call itself failed.
    #[error("search failed: {0}")]
    Search(String),
}

/// Why a turn ended up without recalled memories.
///
/// None of these reach the caller of [`crate::MemoryRecall::recall`]; they
/// exist for logging and for callers that want the detailed outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecallSkip {
    /// No auto-recall section, or it is not enabled.
    #[error("auto recall disabled")]
    Disabled,
    /// Message is shorter than the configured minimum.
    #[error("message too short (length={length}, min={min})")]
    MessageTooShort { length: usize, min: usize },
    /// Heartbeat turn with heartbeat suppression on.
    #[error("heartbeat turn")]
    Heartbeat,
    /// Acquiring the search handle failed.
    #[error("search manager unavailable: {0}")]
    ManagerUnavailable(String),
    /// The search call failed.
    #[error("memory search failed: {0}")]
    SearchFailed(String),
    /// The backend returned nothing above the relevance floor.
    #[error("no candidates")]
    NoCandidates,
    /// Every candidate was excluded before selection.
    #[error("all candidates excluded")]
    AllExcluded,
}

#[cfg(test)]
mod tests {
    use super::{MemoryError, RecallSkip};
    use pretty_assertions::assert_eq;

    #[test]
    fn backend_errors_render_their_cause() {
        assert_eq!(
            MemoryError::Unavailable("index locked".to_string()).to_string(),
            "search manager unavailable: index locked"
        );
        assert_eq!(
            MemoryError::Search("timeout".to_string()).to_string(),
            "search failed: timeout"
        );
    }

    #[test]
    fn short_message_skip_reports_lengths() {
        let skip = RecallSkip::MessageTooShort { length: 3, min: 20 };
        assert_eq!(skip.to_string(), "message too short (length=3, min=20)");
    }
}
