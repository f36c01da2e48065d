//! Job resources: typed payloads and the queries behind them.

use crate::attrs::AttributeMap;
use crate::client::Executor;
use crate::error::{BoardError, BoardResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{Fragment, Param, PartialUpdate, Predicate, assemble};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// External field name -> column translation for jobs.
static COLUMNS: AttributeMap = AttributeMap::new(&[("companyHandle", "company_handle")]);

/// A job row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> BoardResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Payload for creating a job. Field spellings mirror the external API;
/// unknown fields are rejected at deserialization, before compilation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// A sparse update: absent fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<f64>,
    #[serde(default)]
    pub company_handle: Option<String>,
}

impl JobPatch {
    /// Field order here fixes the placeholder order of the generated SET
    /// clause.
    fn into_update(self) -> PartialUpdate {
        PartialUpdate::new()
            .set_opt("title", self.title)
            .set_opt("salary", self.salary)
            .set_opt("equity", self.equity)
            .set_opt("companyHandle", self.company_handle)
    }
}

/// Optional search filters; all absent means "all jobs".
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub min_salary: Option<i32>,
    #[serde(default)]
    pub has_equity: Option<bool>,
}

impl JobFilter {
    fn to_predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        if let Some(title) = &self.title {
            predicate = predicate.contains("title", title);
        }
        if let Some(min_salary) = self.min_salary {
            predicate = predicate.gte("salary", min_salary);
        }
        // A false flag means "no constraint", not "equity = 0".
        if self.has_equity == Some(true) {
            predicate = predicate.nonzero("equity");
        }
        predicate
    }
}

impl Job {
    /// Insert a job and return the stored row.
    pub async fn create(db: &impl Executor, input: NewJob) -> BoardResult<Job> {
        let row = db
            .query_one(
                "INSERT INTO jobs (title, salary, equity, company_handle) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, title, salary, equity, company_handle",
                &[
                    &input.title,
                    &input.salary,
                    &input.equity,
                    &input.company_handle,
                ],
            )
            .await?;
        Job::from_row(&row)
    }

    /// All jobs, ordered by title.
    pub async fn find_all(db: &impl Executor) -> BoardResult<Vec<Job>> {
        let rows = db
            .query(
                "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title",
                &[],
            )
            .await?;
        rows.iter().map(Job::from_row).collect()
    }

    /// Fetch one job by id.
    pub async fn get(db: &impl Executor, id: i32) -> BoardResult<Job> {
        let row = db
            .query_opt(
                "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
                &[&id],
            )
            .await?;
        match row {
            Some(row) => Job::from_row(&row),
            None => Err(BoardError::not_found(format!("No job: {id}"))),
        }
    }

    /// Apply a partial update and return the stored row.
    ///
    /// Fails with [`BoardError::BadInput`] when the patch is empty and
    /// [`BoardError::NotFound`] when the id does not exist.
    pub async fn update(db: &impl Executor, id: i32, patch: JobPatch) -> BoardResult<Job> {
        let query = update_query(id, patch)?;
        let sql = query.to_sql();
        tracing::debug!(sql = %sql, id, "updating job");
        let row = db.query_opt(&sql, &query.params_ref()).await?;
        match row {
            Some(row) => Job::from_row(&row),
            None => Err(BoardError::not_found(format!("No job: {id}"))),
        }
    }

    /// Delete one job by id.
    pub async fn remove(db: &impl Executor, id: i32) -> BoardResult<()> {
        let deleted = db.execute("DELETE FROM jobs WHERE id = $1", &[&id]).await?;
        if deleted == 0 {
            return Err(BoardError::not_found(format!("No job: {id}")));
        }
        Ok(())
    }

    /// Jobs matching the filter, in insertion order.
    ///
    /// With every filter dimension absent this returns all jobs.
    pub async fn search(db: &impl Executor, filter: &JobFilter) -> BoardResult<Vec<Job>> {
        let query = search_query(filter)?;
        let sql = query.to_sql();
        tracing::debug!(sql = %sql, "searching jobs");
        let rows = db.query(&sql, &query.params_ref()).await?;
        rows.iter().map(Job::from_row).collect()
    }
}

fn update_query(id: i32, patch: JobPatch) -> BoardResult<Fragment> {
    let set = patch.into_update().compile(&COLUMNS)?;
    assemble(
        "UPDATE jobs SET {} WHERE id = ? \
         RETURNING id, title, salary, equity, company_handle",
        Some(set),
        [Param::new(id)],
    )
}

fn search_query(filter: &JobFilter) -> BoardResult<Fragment> {
    assemble(
        "SELECT id, title, salary, equity, company_handle FROM jobs WHERE {} ORDER BY id",
        filter.to_predicate().build(),
        [],
    )
}
