//! Rendering of selected memories under a token budget.

use crate::model::MemorySearchResult;

/// Header placed above the recalled memories.
pub const RECALL_HEADER: &str =
    "## Recalled Memories\n\nThe following memories may be relevant to this conversation:";

/// Fixed characters-per-token approximation.
const CHARS_PER_TOKEN: usize = 4;

/// Rendered recall block ready for system-context injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecallBlock {
    /// Header plus rendered memories.
    pub text: String,
    /// Token estimate of the memory body (header excluded).
    pub estimated_tokens: usize,
    /// Whether the body was cut to fit the budget.
    pub truncated: bool,
}

/// Approximate token count: one token per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Render one memory as `[location]: snippet`. The snippet is copied verbatim.
pub fn render_memory(memory: &MemorySearchResult) -> String {
    let tag = match (memory.location(), memory.line) {
        (Some(location), Some(line)) => format!("{location}:{line}"),
        (Some(location), None) => location.to_string(),
        (None, _) => "memory".to_string(),
    };
    format!("[{tag}]: {}", memory.snippet)
}

/// Render memories separated by blank lines.
pub fn render_body(selected: &[MemorySearchResult]) -> String {
    selected
        .iter()
        .map(render_memory)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Hard-cut a body to `max_tokens * 4` characters when it is over budget.
///
/// The cut ignores line and snippet boundaries.
pub fn enforce_budget(body: String, max_tokens: usize) -> (String, bool) {
    if estimate_tokens(&body) <= max_tokens {
        return (body, false);
    }
    let max_chars = max_tokens.saturating_mul(CHARS_PER_TOKEN);
    (body.chars().take(max_chars).collect(), true)
}

/// Render, budget, and wrap the selection. `None` when nothing was selected.
pub fn format_recall_block(
    selected: &[MemorySearchResult],
    max_tokens: usize,
) -> Option<RecallBlock> {
    if selected.is_empty() {
        return None;
    }
    let (body, truncated) = enforce_budget(render_body(selected), max_tokens);
    let estimated_tokens = estimate_tokens(&body);
    Some(RecallBlock {
        text: format!("{RECALL_HEADER}\n\n{body}"),
        estimated_tokens,
        truncated,
    })
}
