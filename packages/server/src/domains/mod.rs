// Domain modules
pub mod careers;
pub mod jobs;
