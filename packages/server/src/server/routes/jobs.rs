//! Job listing endpoint.
//!
//! GET /jobs?role=...&location=...&source=...&limit=...

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::ApiError;
use crate::domains::jobs::{Job, JobFilters, DEFAULT_FETCH_LIMIT};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    /// Matched against the job title
    role: Option<String>,
    location: Option<String>,
    source: Option<String>,
    /// Falls back to the default when blank or not a number
    limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListJobsResponse {
    pub count: usize,
    pub jobs: Vec<Job>,
}

pub async fn list_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<ListJobsResponse>, ApiError> {
    let filters = JobFilters {
        title: params.role,
        location: params.location,
        source: params.source,
    };
    let limit = parse_limit(params.limit.as_deref());

    let jobs = state.job_store.fetch(&filters, limit).await?;

    Ok(Json(ListJobsResponse {
        count: jobs.len(),
        jobs,
    }))
}

fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_FETCH_LIMIT)
}
