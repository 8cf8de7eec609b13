//! Aggregation run: one paginated sweep of the search API for a query.
//!
//! Pipeline:
//! 1. Request pages of `page_size` results at 1-indexed offsets
//! 2. Stop on the first failed or empty page, or after `max_pages`
//! 3. Classify each item, skipping links already seen in this run
//! 4. Pause between pages

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domains::careers::classifier::classify;
use crate::domains::careers::models::CareerLink;
use crate::kernel::BaseSearchService;

/// Results requested per search API call
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    pub max_pages: u32,
    pub page_size: u32,
    /// Courtesy pause between pages, not a backoff
    pub page_delay: Duration,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            max_pages: 10,
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: Duration::from_millis(1500),
        }
    }
}

/// Run the full aggregation for `query`.
///
/// Search failures end the run early with whatever was collected so far;
/// they are logged, never returned.
pub async fn aggregate_career_links(
    searcher: &dyn BaseSearchService,
    query: &str,
    options: &AggregateOptions,
) -> Vec<CareerLink> {
    let mut results = Vec::new();
    let mut seen_urls = HashSet::new();

    for page in 0..options.max_pages {
        let Some(start) = page
            .checked_mul(options.page_size)
            .and_then(|offset| offset.checked_add(1))
        else {
            warn!(query, page, "Search offset out of range, stopping");
            break;
        };

        let items = match searcher.search_page(query, start, options.page_size).await {
            Ok(items) => items,
            Err(e) => {
                warn!(query, start, error = %e, "Search failed, returning partial results");
                break;
            }
        };

        if items.is_empty() {
            debug!(query, start, "No more search results");
            break;
        }

        for item in items {
            let link = match item.link {
                Some(link) if !link.is_empty() => link,
                _ => continue,
            };

            if seen_urls.contains(&link) {
                continue;
            }

            let title = item.title.unwrap_or_default();
            if let Some(career_link) = classify(&link, &title) {
                seen_urls.insert(link);
                results.push(career_link);
            }
        }

        if page + 1 < options.max_pages && !options.page_delay.is_zero() {
            tokio::time::sleep(options.page_delay).await;
        }
    }

    info!(query, results_count = results.len(), "Aggregation run completed");

    results
}
