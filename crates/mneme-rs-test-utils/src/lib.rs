//! Test helpers shared across Mneme crates.

pub mod search;

pub use search::{RecordedSearch, RecordingSearch, StubSearchProvider, scored_results};
