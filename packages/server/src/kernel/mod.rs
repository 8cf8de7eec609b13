//! Kernel module - server infrastructure and dependencies.

pub mod google_search_client;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use google_search_client::GoogleSearchClient;
pub use scheduled_tasks::{run_purge, start_scheduler};
pub use test_dependencies::MockSearchService;
pub use traits::*;
