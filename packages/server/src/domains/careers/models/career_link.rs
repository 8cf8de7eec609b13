use serde::{Deserialize, Serialize};

/// A search result classified as a company careers page.
///
/// Transient: produced by an aggregation run and handed straight to the job
/// store, never persisted in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerLink {
    pub company_name: String,
    pub job_title_from_search: String,
    pub career_url: String,
}
