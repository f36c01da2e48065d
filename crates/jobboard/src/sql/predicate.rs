use crate::sql::fragment::Fragment;
use tokio_postgres::types::ToSql;

/// Composes optional filter dimensions into one boolean expression.
///
/// Every sub-predicate is parenthesized on its own *before* the final
/// ` AND ` join. That guarantee is the point of this type: a dimension that
/// internally becomes a disjunction can never leak an `OR` into its
/// neighbors, so adding or removing one filter never changes what the
/// others mean.
///
/// Column names are trusted configuration supplied by the resource layer;
/// only the compared values are bound as parameters.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Predicate {
    clauses: Vec<Fragment>,
}

impl Predicate {
    /// Create a predicate with no dimensions yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring containment: `(column ILIKE '%pattern%')`.
    ///
    /// `ILIKE` compares case-insensitively server-side, so `"ENGINEER"`
    /// matches a stored `"Software Engineer"`.
    // TODO: escape `%` and `_` inside `pattern`; callers currently pass raw
    // search text through as LIKE syntax.
    pub fn contains(mut self, column: &str, pattern: &str) -> Self {
        let mut clause = Fragment::raw("(");
        clause
            .push(column)
            .push(" ILIKE ")
            .push_bind(format!("%{pattern}%"))
            .push(")");
        self.clauses.push(clause);
        self
    }

    /// Lower bound: `(column >= value)`.
    pub fn gte<T>(mut self, column: &str, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        let mut clause = Fragment::raw("(");
        clause.push(column).push(" >= ").push_bind(value).push(")");
        self.clauses.push(clause);
        self
    }

    /// Upper bound: `(column <= value)`.
    pub fn lte<T>(mut self, column: &str, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        let mut clause = Fragment::raw("(");
        clause.push(column).push(" <= ").push_bind(value).push(")");
        self.clauses.push(clause);
        self
    }

    /// Nonzero test: `(column <> 0)`.
    ///
    /// This is the "flag is true" form of boolean filters; a false flag
    /// means "no constraint" and simply never reaches the builder.
    pub fn nonzero(mut self, column: &str) -> Self {
        let mut clause = Fragment::raw("(");
        clause.push(column).push(" <> 0)");
        self.clauses.push(clause);
        self
    }

    /// Number of populated dimensions.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether no dimension was populated.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Join the dimensions with ` AND ` into a single fragment.
    ///
    /// Returns `None` when nothing was populated: the caller omits the
    /// boolean clause entirely (all rows match), it is not an error.
    pub fn build(self) -> Option<Fragment> {
        let mut clauses = self.clauses.into_iter();
        let mut out = clauses.next()?;
        for clause in clauses {
            out.push(" AND ");
            out.push_fragment(clause);
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_wraps_pattern_and_uses_ilike() {
        let fragment = Predicate::new().contains("title", "engineer").build().unwrap();
        assert_eq!(fragment.to_sql(), "(title ILIKE $1)");
        assert_eq!(fragment.params_ref().len(), 1);
    }

    #[test]
    fn dimensions_join_with_and_each_parenthesized() {
        let fragment = Predicate::new()
            .contains("title", "i")
            .gte("salary", 40_000i32)
            .nonzero("equity")
            .build()
            .unwrap();
        assert_eq!(
            fragment.to_sql(),
            "(title ILIKE $1) AND (salary >= $2) AND (equity <> 0)"
        );
        assert_eq!(fragment.params_ref().len(), 2);
    }

    #[test]
    fn bounds_can_share_a_column() {
        let fragment = Predicate::new()
            .gte("num_employees", 10i32)
            .lte("num_employees", 500i32)
            .build()
            .unwrap();
        assert_eq!(
            fragment.to_sql(),
            "(num_employees >= $1) AND (num_employees <= $2)"
        );
    }

    #[test]
    fn empty_predicate_builds_to_none() {
        assert!(Predicate::new().build().is_none());
    }

    #[test]
    fn single_dimension_stays_parenthesized() {
        let fragment = Predicate::new().gte("salary", 50_000i32).build().unwrap();
        assert_eq!(fragment.to_sql(), "(salary >= $1)");
    }
}
