use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub google_api_key: String,
    pub google_search_engine_id: String,
    /// Upper bound on search API calls per aggregation run
    pub search_max_pages: u32,
    /// Courtesy pause between successive search API calls
    pub search_page_delay: Duration,
    /// Per-request timeout for the search API
    pub search_timeout: Duration,
    /// Jobs older than this (by posted_date) are purged
    pub job_retention_days: i32,
    /// Optional 6-field cron expression for periodic purging
    pub purge_cron: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 20)?,
            port: parse_var("PORT", 8082)?,
            google_api_key: env::var("GOOGLE_API_KEY").context("GOOGLE_API_KEY must be set")?,
            google_search_engine_id: env::var("GOOGLE_SEARCH_ENGINE_ID")
                .context("GOOGLE_SEARCH_ENGINE_ID must be set")?,
            search_max_pages: parse_var("SEARCH_MAX_PAGES", 10)?,
            search_page_delay: Duration::from_millis(parse_var("SEARCH_PAGE_DELAY_MS", 1500)?),
            search_timeout: Duration::from_secs(parse_var("SEARCH_TIMEOUT_SECS", 30)?),
            job_retention_days: parse_var("JOB_RETENTION_DAYS", 30)?,
            purge_cron: env::var("PURGE_CRON")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(name, env::var(name).ok(), default)
}

/// Parse an optional raw value, falling back to `default` when unset or blank.
fn parse_value<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .with_context(|| format!("{} must be a valid number, got {:?}", name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_value_uses_default() {
        let port: u16 = parse_value("PORT", None, 8082).unwrap();
        assert_eq!(port, 8082);
    }

    #[test]
    fn blank_value_uses_default() {
        let pages: u32 = parse_value("SEARCH_MAX_PAGES", Some("  ".into()), 10).unwrap();
        assert_eq!(pages, 10);
    }

    #[test]
    fn value_is_trimmed_and_parsed() {
        let days: i32 = parse_value("JOB_RETENTION_DAYS", Some(" 7 ".into()), 30).unwrap();
        assert_eq!(days, 7);
    }

    #[test]
    fn invalid_value_names_the_variable() {
        let err = parse_value::<u16>("PORT", Some("eighty".into()), 8082).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
