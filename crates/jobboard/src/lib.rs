//! # jobboard
//!
//! Postgres persistence layer for job and company resources.
//!
//! The heart of the crate is the dynamic SQL fragment compiler in [`sql`]:
//! sparse updates and optional search filters become safely parameterized
//! `$1, $2, ...` fragments, with external field names translated to column
//! names through per-resource [`AttributeMap`] tables and values never
//! interpolated into query text. The [`models`] layer composes those
//! fragments into the CRUD and search operations of the job board.
//!
//! ```ignore
//! use jobboard::{Job, JobFilter, JobPatch};
//!
//! let pool = jobboard::create_pool(&std::env::var("DATABASE_URL")?)?;
//! let db = pool.get().await?;
//!
//! // Partial update: only the provided fields change.
//! let patch: JobPatch = serde_json::from_value(body)?;
//! let job = Job::update(&db, job_id, patch).await?;
//!
//! // Optional filters compose into one predicate.
//! let jobs = Job::search(&db, &JobFilter {
//!     title: Some("engineer".into()),
//!     min_salary: Some(90_000),
//!     has_equity: None,
//! }).await?;
//! ```

pub mod attrs;
pub mod client;
pub mod error;
pub mod models;
pub mod row;
pub mod sql;

pub use attrs::AttributeMap;
pub use client::Executor;
pub use error::{BoardError, BoardResult};
pub use models::{
    Company, CompanyFilter, CompanyPatch, Job, JobFilter, JobPatch, NewCompany, NewJob,
};
pub use row::{FromRow, RowExt};
pub use sql::{Fragment, Param, PartialUpdate, Predicate, assemble};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "migrate")]
pub mod migrate;
