//! End-to-end model tests.
//!
//! These run only when `DATABASE_URL` is set; each test works on temporary
//! tables inside a rolled-back transaction, so the target database is left
//! untouched.

use super::*;
use crate::error::BoardError;

async fn try_connect() -> Option<tokio_postgres::Client> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (client, connection) = tokio_postgres::connect(&database_url, tokio_postgres::NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Some(client)
}

async fn create_temp_jobs(tx: &tokio_postgres::Transaction<'_>) {
    tx.execute(
        "CREATE TEMPORARY TABLE jobs (\
             id SERIAL PRIMARY KEY, \
             title TEXT NOT NULL, \
             salary INTEGER, \
             equity DOUBLE PRECISION, \
             company_handle TEXT NOT NULL\
         ) ON COMMIT DROP",
        &[],
    )
    .await
    .expect("create temporary jobs table");
}

fn new_job(title: &str, salary: i32, equity: Option<f64>) -> NewJob {
    NewJob {
        title: title.to_string(),
        salary: Some(salary),
        equity,
        company_handle: "acme".to_string(),
    }
}

#[tokio::test]
async fn search_selects_matching_jobs_in_insertion_order() {
    let Some(mut client) = try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    create_temp_jobs(&tx).await;

    Job::create(&tx, new_job("software engineer", 55_000, Some(0.1)))
        .await
        .unwrap();
    Job::create(&tx, new_job("janitor", 40_000, Some(0.0)))
        .await
        .unwrap();
    Job::create(&tx, new_job("teacher", 70_000, None)).await.unwrap();

    // Both contain "i" case-insensitively and meet the bound; original order.
    let filter = JobFilter {
        title: Some("i".into()),
        min_salary: Some(40_000),
        has_equity: None,
    };
    let found = Job::search(&tx, &filter).await.unwrap();
    let titles: Vec<&str> = found.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, ["software engineer", "janitor"]);

    // ILIKE matches regardless of pattern case.
    let filter = JobFilter {
        title: Some("ENGINEER".into()),
        ..JobFilter::default()
    };
    let found = Job::search(&tx, &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "software engineer");

    // true narrows to rows with nonzero equity; false constrains nothing.
    let with_equity = Job::search(&tx, &JobFilter {
        has_equity: Some(true),
        ..JobFilter::default()
    })
    .await
    .unwrap();
    assert_eq!(with_equity.len(), 1);
    assert_eq!(with_equity[0].title, "software engineer");

    let unconstrained = Job::search(&tx, &JobFilter {
        has_equity: Some(false),
        ..JobFilter::default()
    })
    .await
    .unwrap();
    assert_eq!(unconstrained.len(), 3);

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn update_changes_only_the_given_fields() {
    let Some(mut client) = try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    create_temp_jobs(&tx).await;

    let job = Job::create(&tx, new_job("janitor", 40_000, None)).await.unwrap();

    let patch = JobPatch {
        title: Some("senior janitor".into()),
        salary: Some(45_000),
        ..JobPatch::default()
    };
    let updated = Job::update(&tx, job.id, patch).await.unwrap();
    assert_eq!(updated.title, "senior janitor");
    assert_eq!(updated.salary, Some(45_000));
    assert_eq!(updated.company_handle, "acme");

    let err = Job::update(&tx, job.id + 1000, JobPatch {
        title: Some("x".into()),
        ..JobPatch::default()
    })
    .await
    .unwrap_err();
    assert!(err.is_not_found());

    let err = Job::update(&tx, job.id, JobPatch::default()).await.unwrap_err();
    assert!(matches!(err, BoardError::BadInput(_)));

    tx.rollback().await.unwrap();
}
