//! Company resources: typed payloads and the queries behind them.

use crate::attrs::AttributeMap;
use crate::client::Executor;
use crate::error::{BoardError, BoardResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{Fragment, Param, PartialUpdate, Predicate, assemble};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// External field name -> column translation for companies.
static COLUMNS: AttributeMap = AttributeMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

/// A company row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> BoardResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Payload for creating a company.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A sparse update; the handle itself is not updatable.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    fn into_update(self) -> PartialUpdate {
        PartialUpdate::new()
            .set_opt("name", self.name)
            .set_opt("description", self.description)
            .set_opt("numEmployees", self.num_employees)
            .set_opt("logoUrl", self.logo_url)
    }
}

/// Optional search filters; all absent means "all companies".
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub min_employees: Option<i32>,
    #[serde(default)]
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Reject contradictory bounds before any SQL is built.
    fn validate(&self) -> BoardResult<()> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(BoardError::bad_input(
                    "min_employees must be <= max_employees",
                ));
            }
        }
        Ok(())
    }

    fn to_predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        if let Some(name) = &self.name {
            predicate = predicate.contains("name", name);
        }
        if let Some(min) = self.min_employees {
            predicate = predicate.gte("num_employees", min);
        }
        if let Some(max) = self.max_employees {
            predicate = predicate.lte("num_employees", max);
        }
        predicate
    }
}

impl Company {
    /// Insert a company and return the stored row.
    ///
    /// A duplicate handle surfaces as [`BoardError::UniqueViolation`].
    pub async fn create(db: &impl Executor, input: NewCompany) -> BoardResult<Company> {
        let row = db
            .query_one(
                "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING handle, name, description, num_employees, logo_url",
                &[
                    &input.handle,
                    &input.name,
                    &input.description,
                    &input.num_employees,
                    &input.logo_url,
                ],
            )
            .await?;
        Company::from_row(&row)
    }

    /// All companies, ordered by name.
    pub async fn find_all(db: &impl Executor) -> BoardResult<Vec<Company>> {
        let rows = db
            .query(
                "SELECT handle, name, description, num_employees, logo_url \
                 FROM companies ORDER BY name",
                &[],
            )
            .await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Fetch one company by handle.
    pub async fn get(db: &impl Executor, handle: &str) -> BoardResult<Company> {
        let row = db
            .query_opt(
                "SELECT handle, name, description, num_employees, logo_url \
                 FROM companies WHERE handle = $1",
                &[&handle],
            )
            .await?;
        match row {
            Some(row) => Company::from_row(&row),
            None => Err(BoardError::not_found(format!("No company: {handle}"))),
        }
    }

    /// Apply a partial update and return the stored row.
    pub async fn update(
        db: &impl Executor,
        handle: &str,
        patch: CompanyPatch,
    ) -> BoardResult<Company> {
        let query = update_query(handle, patch)?;
        let sql = query.to_sql();
        tracing::debug!(sql = %sql, handle, "updating company");
        let row = db.query_opt(&sql, &query.params_ref()).await?;
        match row {
            Some(row) => Company::from_row(&row),
            None => Err(BoardError::not_found(format!("No company: {handle}"))),
        }
    }

    /// Delete one company by handle (its jobs cascade).
    pub async fn remove(db: &impl Executor, handle: &str) -> BoardResult<()> {
        let deleted = db
            .execute("DELETE FROM companies WHERE handle = $1", &[&handle])
            .await?;
        if deleted == 0 {
            return Err(BoardError::not_found(format!("No company: {handle}")));
        }
        Ok(())
    }

    /// Companies matching the filter, ordered by name.
    pub async fn search(db: &impl Executor, filter: &CompanyFilter) -> BoardResult<Vec<Company>> {
        let query = search_query(filter)?;
        let sql = query.to_sql();
        tracing::debug!(sql = %sql, "searching companies");
        let rows = db.query(&sql, &query.params_ref()).await?;
        rows.iter().map(Company::from_row).collect()
    }
}

fn update_query(handle: &str, patch: CompanyPatch) -> BoardResult<Fragment> {
    let set = patch.into_update().compile(&COLUMNS)?;
    assemble(
        "UPDATE companies SET {} WHERE handle = ? \
         RETURNING handle, name, description, num_employees, logo_url",
        Some(set),
        [Param::new(handle.to_string())],
    )
}

fn search_query(filter: &CompanyFilter) -> BoardResult<Fragment> {
    filter.validate()?;
    assemble(
        "SELECT handle, name, description, num_employees, logo_url \
         FROM companies WHERE {} ORDER BY name",
        filter.to_predicate().build(),
        [],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_query_translates_camel_case_fields() {
        let patch = CompanyPatch {
            num_employees: Some(250),
            logo_url: Some("https://example.com/logo.png".into()),
            ..CompanyPatch::default()
        };
        let query = update_query("acme", patch).unwrap();
        assert_eq!(
            query.to_sql(),
            "UPDATE companies SET \"num_employees\"=$1, \"logo_url\"=$2 \
             WHERE handle = $3 RETURNING handle, name, description, num_employees, logo_url"
        );
        assert_eq!(query.params_ref().len(), 3);
    }

    #[test]
    fn empty_patch_is_bad_input() {
        assert!(update_query("acme", CompanyPatch::default())
            .unwrap_err()
            .is_bad_input());
    }

    #[test]
    fn search_query_combines_name_and_bounds() {
        let filter = CompanyFilter {
            name: Some("net".into()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let query = search_query(&filter).unwrap();
        assert_eq!(
            query.to_sql(),
            "SELECT handle, name, description, num_employees, logo_url FROM companies \
             WHERE (name ILIKE $1) AND (num_employees >= $2) AND (num_employees <= $3) \
             ORDER BY name"
        );
        assert_eq!(query.params_ref().len(), 3);
    }

    #[test]
    fn inverted_bounds_are_bad_input() {
        let filter = CompanyFilter {
            min_employees: Some(500),
            max_employees: Some(10),
            ..CompanyFilter::default()
        };
        assert!(search_query(&filter).unwrap_err().is_bad_input());
    }

    #[test]
    fn no_filters_selects_everything() {
        let query = search_query(&CompanyFilter::default()).unwrap();
        assert_eq!(
            query.to_sql(),
            "SELECT handle, name, description, num_employees, logo_url FROM companies \
             WHERE TRUE ORDER BY name"
        );
        assert_eq!(query.params_ref().len(), 0);
    }

    #[test]
    fn filter_deserializes_query_shaped_json() {
        let filter: CompanyFilter =
            serde_json::from_str(r#"{"name": "a", "minEmployees": 3}"#).unwrap();
        let query = search_query(&filter).unwrap();
        assert!(query.to_sql().contains("(name ILIKE $1) AND (num_employees >= $2)"));
    }
}
