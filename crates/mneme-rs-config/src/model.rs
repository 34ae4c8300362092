//! Configuration schema for Mneme.

use serde::{Deserialize, Serialize};

/// Root config handed to the recall pipeline by the host.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MnemeConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub agents: AgentsConfig,
}

impl MnemeConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> MnemeConfigBuilder {
        MnemeConfigBuilder::new()
    }

    /// Look up an agent entry by id.
    pub fn agent(&self, agent_id: &str) -> Option<&AgentConfig> {
        self.agents.list.iter().find(|agent| agent.id == agent_id)
    }

    /// Auto-recall section that applies to an agent.
    ///
    /// A per-agent section replaces the global one as a whole; fields are not
    /// merged between the two.
    pub fn auto_recall_for(&self, agent_id: &str) -> Option<&AutoRecallConfig> {
        self.agent(agent_id)
            .and_then(|agent| agent.memory.as_ref())
            .and_then(|memory| memory.auto_recall.as_ref())
            .or(self.memory.auto_recall.as_ref())
    }
}

/// Builder for assembling a `MnemeConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct MnemeConfigBuilder {
    config: MnemeConfig,
}

impl MnemeConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: MnemeConfig::default(),
        }
    }

    /// Replace the global memory configuration.
    pub fn memory(mut self, memory: MemoryConfig) -> Self {
        self.config.memory = memory;
        self
    }

    /// Set the global auto-recall section.
    pub fn auto_recall(mut self, auto_recall: AutoRecallConfig) -> Self {
        self.config.memory.auto_recall = Some(auto_recall);
        self
    }

    /// Append an agent entry.
    pub fn agent(mut self, agent: AgentConfig) -> Self {
        self.config.agents.list.push(agent);
        self
    }

    /// Finalize and return the built `MnemeConfig`.
    pub fn build(self) -> MnemeConfig {
        self.config
    }
}

/// Global memory configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemoryConfig {
    #[serde(default, alias = "autoRecall")]
    pub auto_recall: Option<AutoRecallConfig>,
}

/// Agent list with per-agent overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentsConfig {
    #[serde(default)]
    pub list: Vec<AgentConfig>,
}

/// Single agent entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub memory: Option<AgentMemoryConfig>,
}

impl AgentConfig {
    /// Create an agent entry with no overrides.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            memory: None,
        }
    }

    /// Attach a per-agent auto-recall section.
    pub fn with_auto_recall(mut self, auto_recall: AutoRecallConfig) -> Self {
        self.memory = Some(AgentMemoryConfig {
            auto_recall: Some(auto_recall),
        });
        self
    }
}

/// Per-agent memory overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentMemoryConfig {
    #[serde(default, alias = "autoRecall")]
    pub auto_recall: Option<AutoRecallConfig>,
}

/// Automatic pre-turn recall settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoRecallConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_min_message_length", alias = "minMessageLength")]
    pub min_message_length: usize,
    #[serde(default = "default_max_results", alias = "maxResults")]
    pub max_results: usize,
    #[serde(default = "default_min_score", alias = "minScore")]
    pub min_score: f32,
    #[serde(default = "default_max_tokens", alias = "maxTokens")]
    pub max_tokens: usize,
    #[serde(default = "default_true", alias = "skipHeartbeats")]
    pub skip_heartbeats: bool,
    #[serde(default = "default_true", alias = "excludeBootstrapped")]
    pub exclude_bootstrapped: bool,
    #[serde(default = "default_true", alias = "randomSlot")]
    pub random_slot: bool,
    /// Deprecated. Decay is applied by the search backend; kept so older
    /// configs still load.
    #[serde(default, alias = "respectTemporalDecay")]
    pub respect_temporal_decay: Option<bool>,
}

impl Default for AutoRecallConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_message_length: default_min_message_length(),
            max_results: default_max_results(),
            min_score: default_min_score(),
            max_tokens: default_max_tokens(),
            skip_heartbeats: true,
            exclude_bootstrapped: true,
            random_slot: true,
            respect_temporal_decay: None,
        }
    }
}

impl AutoRecallConfig {
    /// Default settings with recall switched on.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

/// Default minimum message length (in characters) worth recalling for.
fn default_min_message_length() -> usize {
    20
}

/// Default number of memories injected per turn.
fn default_max_results() -> usize {
    3
}

/// Default relevance floor passed to the search backend.
fn default_min_score() -> f32 {
    0.5
}

/// Default token budget for the injected block.
fn default_max_tokens() -> usize {
    1000
}

fn default_true() -> bool {
    true
}
