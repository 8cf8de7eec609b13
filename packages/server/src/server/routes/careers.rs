//! Career search endpoint.
//!
//! GET /search-careers?role=...&city=...
//!
//! Runs one aggregation for "{role} jobs in {city}" and stores the results.

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::ApiError;
use crate::domains::careers::{aggregate_career_links, CareerLink, GOOGLE_SOURCE};
use crate::domains::jobs::UpsertSummary;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchCareersQuery {
    role: Option<String>,
    city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchCareersResponse {
    pub query: String,
    pub results_count: usize,
    pub storage_result: UpsertSummary,
    pub data: Vec<CareerLink>,
}

pub async fn search_careers_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchCareersQuery>,
) -> Result<Json<SearchCareersResponse>, ApiError> {
    let role = params.role.as_deref().map(str::trim).unwrap_or_default();
    let city = params.city.as_deref().map(str::trim).unwrap_or_default();

    if role.is_empty() || city.is_empty() {
        return Err(ApiError::BadRequest(
            "Please provide both 'role' and 'city' query parameters.".to_string(),
        ));
    }

    let query = format!("{} jobs in {}", role, city);
    tracing::info!(query = %query, "Searching careers");

    let results =
        aggregate_career_links(state.search_service.as_ref(), &query, &state.aggregate_options)
            .await;

    let storage_result = state.job_store.upsert(&results, GOOGLE_SOURCE).await?;

    Ok(Json(SearchCareersResponse {
        query,
        results_count: results.len(),
        storage_result,
        data: results,
    }))
}
