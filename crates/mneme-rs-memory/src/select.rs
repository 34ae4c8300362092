//! Diversified selection over score-ordered candidates.

use crate::model::MemorySearchResult;
use rand::Rng;

/// Pick up to `max_results` candidates from a list sorted by descending score.
///
/// Without the random slot (or when there is no tail to draw from) this is the
/// top `max_results`. With it, the top `max_results - 1` keep their order and
/// the last slot is drawn uniformly from everything ranked below them, so
/// lower-ranked memories surface across repeated turns.
pub fn select_diverse<R>(
    mut candidates: Vec<MemorySearchResult>,
    max_results: usize,
    random_slot: bool,
    rng: &mut R,
) -> Vec<MemorySearchResult>
where
    R: Rng,
{
    let max_results = max_results.max(1);
    if !random_slot || candidates.len() <= max_results {
        candidates.truncate(max_results);
        return candidates;
    }

    let tail_start = max_results - 1;
    let pick = rng.random_range(tail_start..candidates.len());
    // `pick` is in the tail, so swapping the last element into its place
    // leaves the prefix untouched.
    let chosen = candidates.swap_remove(pick);
    candidates.truncate(tail_start);
    candidates.push(chosen);
    candidates
}
