//! Recall settings resolved from host configuration.

use log::debug;
use mneme_rs_config::{AutoRecallConfig, MnemeConfig};

/// Settings for one recall invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecallSettings {
    pub enabled: bool,
    /// Messages with fewer characters are not recalled for.
    pub min_message_length: usize,
    /// Memories injected per turn, at least 1.
    pub max_results: usize,
    /// Relevance floor in [0, 1].
    pub min_score: f32,
    /// Token budget for the rendered block, at least 1.
    pub max_tokens: usize,
    pub skip_heartbeats: bool,
    pub exclude_bootstrapped: bool,
    /// Reserve the last slot for a random pick from the lower-ranked tail.
    pub random_slot: bool,
    /// Deprecated and ignored; decay happens in the search backend.
    pub respect_temporal_decay: bool,
}

impl RecallSettings {
    /// Build normalized settings from a config section, ignoring `enabled`.
    pub fn from_config(config: &AutoRecallConfig) -> Self {
        let min_score = if config.min_score.is_nan() {
            0.0
        } else {
            config.min_score.clamp(0.0, 1.0)
        };
        Self {
            enabled: config.enabled,
            min_message_length: config.min_message_length,
            max_results: config.max_results.max(1),
            min_score,
            max_tokens: config.max_tokens.max(1),
            skip_heartbeats: config.skip_heartbeats,
            exclude_bootstrapped: config.exclude_bootstrapped,
            random_slot: config.random_slot,
            respect_temporal_decay: config.respect_temporal_decay.unwrap_or(false),
        }
    }
}

impl Default for RecallSettings {
    fn default() -> Self {
        Self::from_config(&AutoRecallConfig::enabled())
    }
}

/// Resolve recall settings for an agent, or `None` when recall is off.
pub fn resolve_settings(config: &MnemeConfig, agent_id: &str) -> Option<RecallSettings> {
    let section = config.auto_recall_for(agent_id)?;
    if !section.enabled {
        return None;
    }
    if section.respect_temporal_decay.is_some() {
        debug!(
            "ignoring deprecated auto_recall.respect_temporal_decay (agent_id={})",
            agent_id
        );
    }
    Some(RecallSettings::from_config(section))
}
