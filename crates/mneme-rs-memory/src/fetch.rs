//! Candidate fetching from the search backend.

use crate::error::RecallSkip;
use crate::model::{MemorySearchResult, RecallRequest, SearchOptions};
use crate::provider::MemorySearchProvider;
use crate::settings::RecallSettings;
use log::{debug, warn};
use mneme_rs_config::MnemeConfig;

/// Extra results requested when bootstrap exclusion may drop some.
const BOOTSTRAP_HEADROOM: usize = 3;
/// Extra results requested so the random slot has a tail to draw from.
const RANDOM_SLOT_HEADROOM: usize = 2;

/// Number of results to request from the backend. Saturates at `usize::MAX`.
pub fn request_count(settings: &RecallSettings) -> usize {
    let mut count = settings.max_results;
    if settings.exclude_bootstrapped {
        count = count.saturating_add(BOOTSTRAP_HEADROOM);
    }
    if settings.random_slot {
        count = count.saturating_add(RANDOM_SLOT_HEADROOM);
    }
    count
}

/// Acquire the agent's search handle and run the over-fetching query.
///
/// Backend failures are logged and reported as a skip; they never escape.
pub async fn fetch_candidates(
    provider: &dyn MemorySearchProvider,
    config: &MnemeConfig,
    request: &RecallRequest,
    settings: &RecallSettings,
) -> Result<Vec<MemorySearchResult>, RecallSkip> {
    let search = match provider.search_manager(config, &request.agent_id).await {
        Ok(search) => search,
        Err(err) => {
            warn!(
                "auto recall: memory search unavailable (agent_id={}, error={})",
                request.agent_id, err
            );
            return Err(RecallSkip::ManagerUnavailable(err.to_string()));
        }
    };

    let options = SearchOptions {
        max_results: request_count(settings),
        min_score: settings.min_score,
        session_key: request.session_key.clone(),
    };
    match search.search(&request.message, &options).await {
        Ok(results) => {
            debug!(
                "auto recall search returned (agent_id={}, requested={}, returned={})",
                request.agent_id,
                options.max_results,
                results.len()
            );
            Ok(results)
        }
        Err(err) => {
            warn!(
                "auto recall: memory search failed (agent_id={}, error={})",
                request.agent_id, err
            );
            Err(RecallSkip::SearchFailed(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::request_count;
    use crate::settings::RecallSettings;
    use mneme_rs_config::MnemeConfig;
    use pretty_assertions::assert_eq;

    fn settings(max_results: usize, exclude_bootstrapped: bool, random_slot: bool) -> RecallSettings {
        RecallSettings {
            max_results,
            exclude_bootstrapped,
            random_slot,
            ..RecallSettings::default()
        }
    }

    #[test]
    fn request_count_adds_headroom_per_stage() {
        assert_eq!(request_count(&settings(3, false, false)), 3);
        assert_eq!(request_count(&settings(3, true, false)), 6);
        assert_eq!(request_count(&settings(3, false, true)), 5);
        assert_eq!(request_count(&settings(3, true, true)), 8);
        assert_eq!(request_count(&settings(1, true, true)), 6);
    }

    #[test]
    fn request_count_saturates_for_huge_max_results() {
        assert_eq!(request_count(&settings(usize::MAX, true, true)), usize::MAX);
        assert_eq!(request_count(&settings(usize::MAX - 1, false, true)), usize::MAX);
    }

    #[test]
    fn loaded_huge_max_results_requests_saturated_count() {
        let config = MnemeConfig::load_from_str(
            "{ memory: { auto_recall: { enabled: true, max_results: 18446744073709551615 } } }",
        )
        .expect("config");
        let section = config.auto_recall_for("main").expect("section");
        let count = request_count(&RecallSettings::from_config(section));
        assert!(count >= section.max_results);
    }
}
