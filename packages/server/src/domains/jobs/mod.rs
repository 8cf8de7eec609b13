//! Jobs domain - persisted job postings

pub mod models;
pub mod store;

pub use models::{Job, JobFilters, UpsertSummary, DEFAULT_FETCH_LIMIT};
pub use store::{JobStore, PoolStats};
