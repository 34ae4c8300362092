//! Pre-turn memory recall for Mneme.
//!
//! Given the incoming message for an agent turn, the pipeline resolves the
//! recall settings, gates cheap-to-reject traffic, over-fetches candidates
//! from an injected search backend, drops content the agent already carries
//! in its bootstrap context, picks a diversified top slice, and renders it
//! under a token budget.

pub mod bootstrap;
pub mod eligibility;
pub mod error;
pub mod fetch;
pub mod format;
pub mod model;
pub mod provider;
pub mod recall;
pub mod select;
pub mod settings;

/// Bootstrap exclusion.
pub use bootstrap::{BOOTSTRAP_FILE_NAMES, exclude_bootstrapped, is_bootstrapped};
/// Pre-search gate.
pub use eligibility::check_eligibility;
/// Error and skip types.
pub use error::{MemoryError, RecallSkip};
/// Over-fetch sizing.
pub use fetch::request_count;
/// Rendering and budgeting.
pub use format::{RECALL_HEADER, RecallBlock, estimate_tokens, format_recall_block};
/// Candidate, request, and search option models.
pub use model::{MemorySearchResult, RecallRequest, SearchOptions};
/// Search backend interfaces.
pub use provider::{MemorySearch, MemorySearchProvider, SharedSearchProvider};
/// Recall pipeline.
pub use recall::MemoryRecall;
/// Diversity selection.
pub use select::select_diverse;
/// Resolved settings.
pub use settings::{RecallSettings, resolve_settings};
