// Jobscout - career link ingestion service
//
// Scrapes company careers pages through a web search API, stores them in
// Postgres keyed by link, and serves them over a small HTTP API.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
