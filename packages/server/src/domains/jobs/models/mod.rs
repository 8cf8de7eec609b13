pub mod job;

pub use job::{Job, JobFilters, UpsertSummary, DEFAULT_FETCH_LIMIT};
