use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Rows returned by `JobStore::fetch` when no limit is given
pub const DEFAULT_FETCH_LIMIT: i64 = 100;

/// A persisted job posting. `link` is unique across the whole table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub salary: Option<String>,
    pub link: String,
    pub source: String,
    pub posted_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional, conjunctive filters for listing jobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// Exact source tag
    pub source: Option<String>,
}

impl JobFilters {
    /// Drop blank values so they impose no constraint
    pub fn normalized(&self) -> Self {
        fn present(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            title: present(&self.title),
            location: present(&self.location),
            source: present(&self.source),
        }
    }
}

/// Outcome of one batch upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertSummary {
    pub new_jobs: u64,
    pub duplicates: u64,
    /// Rows skipped because of a non-conflict insert error
    pub failed: u64,
}
