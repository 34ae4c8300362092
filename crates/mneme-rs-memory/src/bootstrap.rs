//! Exclusion of memories the agent already carries in its bootstrap context.

use crate::model::MemorySearchResult;
use log::debug;

/// Long-term memory files that are always injected at bootstrap.
pub const BOOTSTRAP_FILE_NAMES: [&str; 2] = ["MEMORY.md", "memory.md"];

/// Whether a candidate location duplicates bootstrapped content.
///
/// Matches a well-known bootstrap file name exactly, or any bootstrapped
/// fragment by substring in either direction. The substring test matches
/// absolute and relative spellings of the same file, and also unrelated
/// files whose paths happen to overlap.
pub fn is_bootstrapped(location: &str, bootstrapped: &[String]) -> bool {
    let file_name = location
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(location);
    if BOOTSTRAP_FILE_NAMES.contains(&file_name) {
        return true;
    }
    bootstrapped
        .iter()
        .map(String::as_str)
        .filter(|fragment| !fragment.is_empty())
        .any(|fragment| location.contains(fragment) || fragment.contains(location))
}

/// Drop candidates whose location is bootstrapped. Candidates without a
/// location are always kept.
pub fn exclude_bootstrapped(
    candidates: Vec<MemorySearchResult>,
    bootstrapped: &[String],
) -> Vec<MemorySearchResult> {
    candidates
        .into_iter()
        .filter(|candidate| match candidate.location() {
            Some(location) if is_bootstrapped(location, bootstrapped) => {
                debug!("auto recall excluded bootstrapped memory (location={location})");
                false
            }
            _ => true,
        })
        .collect()
}
