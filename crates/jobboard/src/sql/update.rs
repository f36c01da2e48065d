use crate::attrs::{self, AttributeMap};
use crate::error::{BoardError, BoardResult};
use crate::sql::fragment::{Fragment, Param};
use tokio_postgres::types::ToSql;

/// An ordered, sparse set of field assignments awaiting compilation into a
/// `SET` clause.
///
/// Fields carry their *external* names; column translation happens in
/// [`compile`](PartialUpdate::compile) through the resource's
/// [`AttributeMap`]. Assignments compile in insertion order, which makes the
/// generated placeholder numbering reproducible.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct PartialUpdate {
    fields: Vec<(String, Param)>,
}

impl PartialUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a field.
    ///
    /// Binding an `Option` that is `None` assigns SQL `NULL`; to leave a
    /// field untouched, don't assign it (see [`set_opt`](Self::set_opt)).
    pub fn set<T>(mut self, field: impl Into<String>, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.fields.push((field.into(), Param::new(value)));
        self
    }

    /// Assign a field only when a value is present (`None` => field absent).
    pub fn set_opt<T>(self, field: impl Into<String>, value: Option<T>) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        if let Some(v) = value {
            self.set(field, v)
        } else {
            self
        }
    }

    /// Number of assigned fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been assigned.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compile into a `SET`-clause fragment: `"first_name"=$1, "age"=$2`.
    ///
    /// Column names come from translating each field through `columns`;
    /// values are bound in field order, never embedded in the text. An empty
    /// update has no SQL representation and fails with
    /// [`BadInput`](BoardError::BadInput).
    pub fn compile(self, columns: &AttributeMap) -> BoardResult<Fragment> {
        if self.fields.is_empty() {
            return Err(BoardError::bad_input("no data"));
        }

        let mut fragment = Fragment::empty();
        for (i, (field, value)) in self.fields.into_iter().enumerate() {
            if i > 0 {
                fragment.push(", ");
            }
            fragment.push(&attrs::quoted(columns.translate(&field)));
            fragment.push("=");
            fragment.push_param(value);
        }
        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLUMNS: AttributeMap =
        AttributeMap::new(&[("firstName", "first_name"), ("age", "age")]);

    #[test]
    fn compiles_set_clause_in_field_order() {
        let fragment = PartialUpdate::new()
            .set("firstName", "Aliya")
            .set("age", 32i32)
            .compile(&COLUMNS)
            .unwrap();
        assert_eq!(fragment.to_sql(), r#""first_name"=$1, "age"=$2"#);
        assert_eq!(fragment.params_ref().len(), 2);
    }

    #[test]
    fn unmapped_field_keeps_its_name() {
        let fragment = PartialUpdate::new()
            .set("nickname", "Ali")
            .compile(&COLUMNS)
            .unwrap();
        assert_eq!(fragment.to_sql(), r#""nickname"=$1"#);
    }

    #[test]
    fn empty_update_is_bad_input() {
        let err = PartialUpdate::new().compile(&COLUMNS).unwrap_err();
        assert!(err.is_bad_input());
        assert_eq!(err.to_string(), "Bad input: no data");
    }

    #[test]
    fn set_opt_skips_absent_fields() {
        let fragment = PartialUpdate::new()
            .set_opt("firstName", None::<String>)
            .set_opt("age", Some(32i32))
            .compile(&COLUMNS)
            .unwrap();
        assert_eq!(fragment.to_sql(), r#""age"=$1"#);
        assert_eq!(fragment.params_ref().len(), 1);
    }

    #[test]
    fn all_absent_fields_is_bad_input() {
        let err = PartialUpdate::new()
            .set_opt("firstName", None::<String>)
            .set_opt("age", None::<i32>)
            .compile(&COLUMNS)
            .unwrap_err();
        assert!(err.is_bad_input());
    }

    #[test]
    fn explicit_null_still_binds_a_value() {
        let fragment = PartialUpdate::new()
            .set("age", None::<i32>)
            .compile(&COLUMNS)
            .unwrap();
        assert_eq!(fragment.to_sql(), r#""age"=$1"#);
        assert_eq!(fragment.params_ref().len(), 1);
    }
}
