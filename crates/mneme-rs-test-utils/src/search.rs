use async_trait::async_trait;
use mneme_rs_config::MnemeConfig;
use mneme_rs_memory::{
    MemoryError, MemorySearch, MemorySearchProvider, MemorySearchResult, SearchOptions,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// One call seen by [`RecordingSearch`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSearch {
    pub query: String,
    pub options: SearchOptions,
}

/// Search handle that returns fixed results (or a fixed error) and records
/// every call.
#[derive(Default)]
pub struct RecordingSearch {
    results: Vec<MemorySearchResult>,
    failure: Option<String>,
    calls: Mutex<Vec<RecordedSearch>>,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: Vec<MemorySearchResult>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedSearch> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl MemorySearch for RecordingSearch {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<MemorySearchResult>, MemoryError> {
        self.calls.lock().push(RecordedSearch {
            query: query.to_string(),
            options: options.clone(),
        });
        match &self.failure {
            Some(message) => Err(MemoryError::Search(message.clone())),
            None => Ok(self.results.clone()),
        }
    }
}

/// Provider handing out a shared [`RecordingSearch`], or failing acquisition.
#[derive(Clone)]
pub struct StubSearchProvider {
    search: Arc<RecordingSearch>,
    unavailable: Option<String>,
    acquisitions: Arc<Mutex<Vec<String>>>,
}

impl StubSearchProvider {
    pub fn new(search: Arc<RecordingSearch>) -> Self {
        Self {
            search,
            unavailable: None,
            acquisitions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_results(results: Vec<MemorySearchResult>) -> Self {
        Self::new(Arc::new(RecordingSearch::with_results(results)))
    }

    /// Provider whose acquisition always fails.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            unavailable: Some(message.into()),
            ..Self::new(Arc::new(RecordingSearch::new()))
        }
    }

    pub fn search(&self) -> Arc<RecordingSearch> {
        self.search.clone()
    }

    /// Agent ids that asked for a search handle, in order.
    pub fn acquisitions(&self) -> Vec<String> {
        self.acquisitions.lock().clone()
    }
}

#[async_trait]
impl MemorySearchProvider for StubSearchProvider {
    async fn search_manager(
        &self,
        _config: &MnemeConfig,
        agent_id: &str,
    ) -> Result<Arc<dyn MemorySearch>, MemoryError> {
        self.acquisitions.lock().push(agent_id.to_string());
        if let Some(message) = &self.unavailable {
            return Err(MemoryError::Unavailable(message.clone()));
        }
        let search: Arc<dyn MemorySearch> = self.search.clone();
        Ok(search)
    }
}

/// Results with the given scores, each with its own daily-note path.
pub fn scored_results(scores: &[f32]) -> Vec<MemorySearchResult> {
    scores
        .iter()
        .enumerate()
        .map(|(idx, score)| {
            MemorySearchResult::new(format!("memory {idx}"), *score)
                .with_path(format!("memory/2024-05-{:02}.md", idx + 1))
                .with_line(idx as u32 + 1)
        })
        .collect()
}
