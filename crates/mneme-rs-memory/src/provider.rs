//! Search backend interfaces.
//!
//! The recall pipeline never touches storage; similarity search, indexing and
//! any score decay live behind these traits.

use crate::error::MemoryError;
use crate::model::{MemorySearchResult, SearchOptions};
use async_trait::async_trait;
use mneme_rs_config::MnemeConfig;
use std::sync::Arc;

#[async_trait]
/// Search handle for one agent.
pub trait MemorySearch: Send + Sync {
    /// Search memories for `query`.
    ///
    /// Results must be sorted by descending score and already filtered by
    /// `options.min_score`.
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<MemorySearchResult>, MemoryError>;
}

#[async_trait]
/// Hands out search handles per agent.
pub trait MemorySearchProvider: Send + Sync {
    /// Acquire the search handle for an agent.
    async fn search_manager(
        &self,
        config: &MnemeConfig,
        agent_id: &str,
    ) -> Result<Arc<dyn MemorySearch>, MemoryError>;
}

/// Provider that returns the same search handle for every agent.
#[derive(Clone)]
pub struct SharedSearchProvider {
    search: Arc<dyn MemorySearch>,
}

impl SharedSearchProvider {
    pub fn new(search: Arc<dyn MemorySearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl MemorySearchProvider for SharedSearchProvider {
    async fn search_manager(
        &self,
        _config: &MnemeConfig,
        _agent_id: &str,
    ) -> Result<Arc<dyn MemorySearch>, MemoryError> {
        Ok(self.search.clone())
    }
}
