pub mod aggregate_career_links;

pub use aggregate_career_links::{aggregate_career_links, AggregateOptions, DEFAULT_PAGE_SIZE};
