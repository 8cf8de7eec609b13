//! Application setup and server configuration.

use std::sync::Arc;

use axum::{extract::Extension, http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::careers::AggregateOptions;
use crate::domains::jobs::JobStore;
use crate::kernel::BaseSearchService;
use crate::server::routes::{health_handler, list_jobs_handler, search_careers_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub job_store: JobStore,
    pub search_service: Arc<dyn BaseSearchService>,
    pub aggregate_options: AggregateOptions,
}

impl AppState {
    pub fn new(
        job_store: JobStore,
        search_service: Arc<dyn BaseSearchService>,
        aggregate_options: AggregateOptions,
    ) -> Self {
        Self {
            job_store,
            search_service,
            aggregate_options,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - the API is public and read-only apart from ingestion
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/search-careers", get(search_careers_handler))
        .route("/jobs", get(list_jobs_handler))
        // Health check
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
