//! Postgres-backed job store.
//!
//! Owns the `jobs` schema and every write path: batch upsert from
//! aggregation runs and the age-based purge. There is no UPDATE path.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool, Postgres, QueryBuilder};
use tracing::{info, warn};

use super::models::{Job, JobFilters, UpsertSummary};
use crate::domains::careers::CareerLink;

const CREATE_JOBS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS jobs (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        company TEXT NOT NULL,
        experience TEXT,
        location TEXT,
        skills TEXT[],
        salary TEXT,
        link TEXT UNIQUE NOT NULL,
        source TEXT NOT NULL,
        posted_date TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )";

const CREATE_INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_jobs_title ON jobs(title)",
    "CREATE INDEX IF NOT EXISTS idx_jobs_company ON jobs(company)",
    "CREATE INDEX IF NOT EXISTS idx_jobs_location ON jobs(location)",
    "CREATE INDEX IF NOT EXISTS idx_jobs_source ON jobs(source)",
];

/// Connection pool utilization snapshot
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub max: u32,
}

/// Shared handle to the jobs table. Cloning shares the pool.
#[derive(Clone)]
pub struct JobStore {
    pool: PgPool,
}

impl JobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a bounded connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip to the database. Returns whether the `jobs` table exists.
    pub async fn ping(&self) -> Result<bool> {
        sqlx::query_scalar("SELECT to_regclass('jobs') IS NOT NULL")
            .fetch_one(&self.pool)
            .await
            .context("Database ping failed")
    }

    pub fn pool_stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
            max: self.pool.options().get_max_connections(),
        }
    }

    /// Ensure the table, its unique constraint on `link` and secondary
    /// indexes exist. Safe to run on every startup.
    pub async fn initialize_schema(&self) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin schema transaction")?;

        sqlx::query(CREATE_JOBS_TABLE)
            .execute(&mut *tx)
            .await
            .context("Failed to create jobs table")?;

        // Tables created by older deployments may predate the constraint
        let has_unique: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM pg_constraint
                 WHERE conrelid = 'jobs'::regclass AND contype = 'u'
             )",
        )
        .fetch_one(&mut *tx)
        .await
        .context("Failed to inspect jobs constraints")?;

        if !has_unique {
            sqlx::query("ALTER TABLE jobs ADD CONSTRAINT jobs_link_key UNIQUE (link)")
                .execute(&mut *tx)
                .await
                .context("Failed to add unique constraint on jobs.link")?;
        }

        for statement in CREATE_INDEXES {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to create index: {}", statement))?;
        }

        tx.commit()
            .await
            .context("Failed to commit schema transaction")?;

        info!("Database schema initialized");
        Ok(())
    }

    /// Insert each result, skipping links that already exist.
    ///
    /// The batch commits as one transaction. Each row runs in its own
    /// savepoint, so a failed insert is rolled back alone and counted in
    /// `failed` while the rest of the batch proceeds.
    pub async fn upsert(&self, results: &[CareerLink], source: &str) -> Result<UpsertSummary> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin upsert transaction")?;

        let mut summary = UpsertSummary::default();

        for result in results {
            let mut savepoint = Connection::begin(&mut *tx)
                .await
                .context("Failed to open savepoint")?;

            let inserted = sqlx::query_scalar::<_, i32>(
                "INSERT INTO jobs (title, company, location, link, source)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (link) DO NOTHING
                 RETURNING id",
            )
            .bind(&result.job_title_from_search)
            .bind(&result.company_name)
            .bind("")
            .bind(&result.career_url)
            .bind(source)
            .fetch_optional(&mut *savepoint)
            .await;

            match inserted {
                Ok(id) => {
                    savepoint
                        .commit()
                        .await
                        .context("Failed to release savepoint")?;
                    if id.is_some() {
                        summary.new_jobs += 1;
                    } else {
                        summary.duplicates += 1;
                    }
                }
                Err(e) => {
                    warn!(link = %result.career_url, error = %e, "Failed to insert job, skipping");
                    savepoint
                        .rollback()
                        .await
                        .context("Failed to roll back savepoint")?;
                    summary.failed += 1;
                }
            }
        }

        tx.commit()
            .await
            .context("Failed to commit upsert transaction")?;

        info!(
            source,
            new_jobs = summary.new_jobs,
            duplicates = summary.duplicates,
            failed = summary.failed,
            "Stored jobs"
        );

        Ok(summary)
    }

    /// List jobs matching `filters`, newest first
    pub async fn fetch(&self, filters: &JobFilters, limit: i64) -> Result<Vec<Job>> {
        let filters = filters.normalized();
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM jobs WHERE 1=1");

        if let Some(title) = &filters.title {
            query.push(" AND title ILIKE ").push_bind(contains_pattern(title));
        }

        if let Some(location) = &filters.location {
            query
                .push(" AND location ILIKE ")
                .push_bind(contains_pattern(location));
        }

        if let Some(source) = &filters.source {
            query.push(" AND source = ").push_bind(source.clone());
        }

        query
            .push(" ORDER BY posted_date DESC NULLS LAST, id DESC LIMIT ")
            .push_bind(limit.max(0));

        query
            .build_query_as::<Job>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch jobs")
    }

    /// Delete jobs whose `posted_date` is older than the retention window.
    /// Returns the number of rows removed.
    pub async fn purge(&self, retention_days: i32) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM jobs WHERE posted_date < NOW() - make_interval(days => $1)",
        )
        .bind(retention_days)
        .execute(&self.pool)
        .await
        .context("Failed to purge old jobs")?;

        Ok(result.rows_affected())
    }
}

/// ILIKE pattern matching `value` anywhere, with wildcards in `value` escaped
fn contains_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
