// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Classification and deduplication live in the careers domain.
//
// Naming convention: Base* for trait names (e.g., BaseSearchService)

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

// =============================================================================
// Web Search Trait (Infrastructure)
// =============================================================================

/// One raw result item from a web search page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl SearchItem {
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            title: Some(title.into()),
        }
    }
}

#[async_trait]
pub trait BaseSearchService: Send + Sync {
    /// Fetch one page of results.
    ///
    /// `start` is the 1-indexed offset of the first result, `num` the page size.
    /// An empty page means the result set is exhausted.
    async fn search_page(&self, query: &str, start: u32, num: u32) -> Result<Vec<SearchItem>>;
}
