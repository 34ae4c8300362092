//! Pre-turn recall pipeline.

use crate::bootstrap::exclude_bootstrapped;
use crate::eligibility::check_eligibility;
use crate::error::RecallSkip;
use crate::fetch::fetch_candidates;
use crate::format::format_recall_block;
use crate::model::{MemorySearchResult, RecallRequest};
use crate::provider::MemorySearchProvider;
use crate::select::select_diverse;
use crate::settings::{RecallSettings, resolve_settings};
use log::{debug, info};
use mneme_rs_config::MnemeConfig;
use rand::Rng;
use std::sync::Arc;

/// Selects memories to inject into an agent's context before a turn.
///
/// Holds no per-call state; one instance can serve every agent concurrently.
#[derive(Clone)]
pub struct MemoryRecall {
    /// Search backend.
    provider: Arc<dyn MemorySearchProvider>,
}

impl MemoryRecall {
    pub fn new(provider: Arc<dyn MemorySearchProvider>) -> Self {
        Self { provider }
    }

    /// Recall memories for a turn. `None` means nothing to inject.
    pub async fn recall(&self, config: &MnemeConfig, request: &RecallRequest) -> Option<String> {
        log_outcome(request, self.recall_detailed(config, request).await)
    }

    /// Like [`Self::recall`], drawing the random slot from `rng`.
    pub async fn recall_with_rng<R>(
        &self,
        config: &MnemeConfig,
        request: &RecallRequest,
        rng: &mut R,
    ) -> Option<String>
    where
        R: Rng,
    {
        log_outcome(
            request,
            self.recall_detailed_with_rng(config, request, rng).await,
        )
    }

    /// Recall memories, reporting why nothing was recalled.
    pub async fn recall_detailed(
        &self,
        config: &MnemeConfig,
        request: &RecallRequest,
    ) -> Result<String, RecallSkip> {
        let (settings, candidates) = self.gather(config, request).await?;
        assemble(request, &settings, candidates, &mut rand::rng())
    }

    /// Like [`Self::recall_detailed`], drawing the random slot from `rng`.
    pub async fn recall_detailed_with_rng<R>(
        &self,
        config: &MnemeConfig,
        request: &RecallRequest,
        rng: &mut R,
    ) -> Result<String, RecallSkip>
    where
        R: Rng,
    {
        let (settings, candidates) = self.gather(config, request).await?;
        assemble(request, &settings, candidates, rng)
    }

    /// Resolve, gate, fetch, and filter. Everything up to selection.
    async fn gather(
        &self,
        config: &MnemeConfig,
        request: &RecallRequest,
    ) -> Result<(RecallSettings, Vec<MemorySearchResult>), RecallSkip> {
        let settings =
            resolve_settings(config, &request.agent_id).ok_or(RecallSkip::Disabled)?;
        check_eligibility(&settings, &request.message, request.is_heartbeat)?;

        let mut candidates =
            fetch_candidates(self.provider.as_ref(), config, request, &settings).await?;
        if candidates.is_empty() {
            return Err(RecallSkip::NoCandidates);
        }

        if settings.exclude_bootstrapped {
            candidates = exclude_bootstrapped(candidates, &request.bootstrapped_paths);
            if candidates.is_empty() {
                return Err(RecallSkip::AllExcluded);
            }
        }
        Ok((settings, candidates))
    }
}

/// Select and render. Runs after the last await so the RNG is never held
/// across a suspension point.
fn assemble<R>(
    request: &RecallRequest,
    settings: &RecallSettings,
    candidates: Vec<MemorySearchResult>,
    rng: &mut R,
) -> Result<String, RecallSkip>
where
    R: Rng,
{
    let selected = select_diverse(candidates, settings.max_results, settings.random_slot, rng);
    // `gather` only returns non-empty candidates and `max_results >= 1`, so
    // the selection is never empty here.
    let block =
        format_recall_block(&selected, settings.max_tokens).ok_or(RecallSkip::NoCandidates)?;
    info!(
        "auto recall injected memories (agent_id={}, results={}, estimated_tokens={}, truncated={})",
        request.agent_id,
        selected.len(),
        block.estimated_tokens,
        block.truncated
    );
    Ok(block.text)
}

fn log_outcome(request: &RecallRequest, outcome: Result<String, RecallSkip>) -> Option<String> {
    match outcome {
        Ok(text) => Some(text),
        Err(skip) => {
            debug!(
                "auto recall skipped (agent_id={}, reason={})",
                request.agent_id, skip
            );
            None
        }
    }
}
