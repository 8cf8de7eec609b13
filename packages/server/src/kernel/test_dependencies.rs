// TestDependencies - mock implementations for testing
//
// Provides a scripted search service that can stand in for the real search
// API in unit and integration tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{BaseSearchService, SearchItem};

// =============================================================================
// Mock Search Service
// =============================================================================

/// Arguments captured from a search_page call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCallArgs {
    pub query: String,
    pub start: u32,
    pub num: u32,
}

/// Returns scripted pages in order. Once the script runs out, every call
/// returns an empty page.
#[derive(Clone, Default)]
pub struct MockSearchService {
    pages: Arc<Mutex<VecDeque<std::result::Result<Vec<SearchItem>, String>>>>,
    calls: Arc<Mutex<Vec<SearchCallArgs>>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page of results
    pub fn with_page(self, items: Vec<SearchItem>) -> Self {
        self.pages.lock().unwrap().push_back(Ok(items));
        self
    }

    /// Queue a failed call
    pub fn with_error(self, message: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<SearchCallArgs> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseSearchService for MockSearchService {
    async fn search_page(&self, query: &str, start: u32, num: u32) -> Result<Vec<SearchItem>> {
        self.calls.lock().unwrap().push(SearchCallArgs {
            query: query.to_string(),
            start,
            num,
        });

        match self.pages.lock().unwrap().pop_front() {
            Some(Ok(items)) => Ok(items),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(vec![]),
        }
    }
}
