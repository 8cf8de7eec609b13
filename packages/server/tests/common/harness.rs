//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests. The container and the
//! schema are initialized once on first use, then reused.

use anyhow::{Context, Result};
use server_core::domains::careers::CareerLink;
use server_core::domains::jobs::JobStore;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    /// Connection URL without a database name
    server_url: String,
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let server_url = format!("postgresql://postgres:postgres@{}:{}", pg_host, pg_port);
        let db_url = format!("{}/postgres", server_url);

        // Create the schema once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for schema setup")?;
        JobStore::new(pool).initialize_schema().await?;

        Ok(Self {
            server_url,
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// Every test shares the same database, so tests scope their rows with
/// unique links and source tags (see [`TestHarness::unique_source`]).
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let summary = ctx.job_store.upsert(&links, "google").await.unwrap();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub job_store: JobStore,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            job_store: JobStore::new(db_pool.clone()),
            db_pool,
        })
    }

    /// A source tag no other test uses
    pub fn unique_source(&self) -> String {
        format!("test-{}", Uuid::new_v4())
    }

    /// Move a job's posted_date `days` into the past
    pub async fn backdate(&self, link: &str, days: i32) -> Result<()> {
        sqlx::query(
            "UPDATE jobs SET posted_date = NOW() - make_interval(days => $2) WHERE link = $1",
        )
        .bind(link)
        .bind(days)
        .execute(&self.db_pool)
        .await?;
        Ok(())
    }

    /// A pool on a freshly created database of its own, for tests that
    /// alter the schema or delete rows they did not insert. The schema is
    /// not initialized.
    pub async fn isolated_database(&self) -> Result<PgPool> {
        let infra = SharedTestInfra::get().await;
        let name = format!("jobs_{}", Uuid::new_v4().simple());

        sqlx::raw_sql(&format!("CREATE DATABASE {}", name))
            .execute(&self.db_pool)
            .await
            .context("Failed to create isolated database")?;

        PgPool::connect(&format!("{}/{}", infra.server_url, name))
            .await
            .context("Failed to connect to isolated database")
    }

    /// A [`JobStore`] on its own initialized database
    pub async fn isolated_store(&self) -> Result<JobStore> {
        let store = JobStore::new(self.isolated_database().await?);
        store.initialize_schema().await?;
        Ok(store)
    }

    pub async fn count_links(&self, link: &str) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE link = $1")
            .bind(link)
            .fetch_one(&self.db_pool)
            .await?;
        Ok(count)
    }
}

/// A careers link with a URL no other test uses
pub fn career_link(company: &str, title: &str) -> CareerLink {
    CareerLink {
        company_name: company.to_string(),
        job_title_from_search: title.to_string(),
        career_url: format!(
            "https://{}.example.com/careers/{}",
            company.to_lowercase(),
            Uuid::new_v4()
        ),
    }
}
