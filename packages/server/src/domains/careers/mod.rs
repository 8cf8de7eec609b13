//! Careers domain - search aggregation and careers-page classification

pub mod activities;
pub mod classifier;
pub mod models;

// Re-export activities
pub use activities::{aggregate_career_links, AggregateOptions, DEFAULT_PAGE_SIZE};

// Re-export classifier entry point
pub use classifier::{classify, company_name_from_url};

// Re-export models
pub use models::CareerLink;

/// Provenance tag stored with jobs ingested through web search
pub const GOOGLE_SOURCE: &str = "google";
