//! Tests for the periodic job purge.

mod common;

use std::time::Duration;

use common::{career_link, TestHarness};
use server_core::kernel::start_scheduler;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test(flavor = "multi_thread")]
async fn scheduled_purge_removes_expired_jobs(ctx: &TestHarness) {
    let store = ctx.isolated_store().await.unwrap();
    let expired = career_link("Expired", "Chef");
    let fresh = career_link("Fresh", "Chef");
    store
        .upsert(&[expired.clone(), fresh.clone()], "google")
        .await
        .unwrap();
    sqlx::query("UPDATE jobs SET posted_date = NOW() - INTERVAL '45 days' WHERE link = $1")
        .bind(&expired.career_url)
        .execute(store.pool())
        .await
        .unwrap();

    // Every second
    let mut scheduler = start_scheduler(store.clone(), "* * * * * *", 30)
        .await
        .unwrap();

    let mut remaining: Vec<String> = Vec::new();
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(200)).await;
        remaining = sqlx::query_scalar("SELECT link FROM jobs")
            .fetch_all(store.pool())
            .await
            .unwrap();
        if remaining.len() == 1 {
            break;
        }
    }
    scheduler.shutdown().await.unwrap();

    assert_eq!(remaining, vec![fresh.career_url]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn malformed_schedule_is_rejected(ctx: &TestHarness) {
    let err = start_scheduler(ctx.job_store.clone(), "every night", 30)
        .await
        .err()
        .expect("expected start_scheduler to fail");

    assert!(
        format!("{:#}", err).contains("Invalid purge schedule 'every night'"),
        "{:#}",
        err
    );
}
