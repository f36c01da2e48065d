//! Attribute name translation.
//!
//! Request bodies and query strings use external field names
//! (`companyHandle`, `numEmployees`); the tables use column names
//! (`company_handle`, `num_employees`). An [`AttributeMap`] is the fixed,
//! per-resource translation table between the two. It is constructed `const`
//! next to each model and injected into the update compiler, never rebuilt
//! per request.

/// Translation table from external field names to column names.
///
/// Names without an entry pass through unchanged, so only fields whose
/// spelling actually differs need a row.
#[derive(Debug)]
pub struct AttributeMap {
    entries: &'static [(&'static str, &'static str)],
}

impl AttributeMap {
    /// Create a map over a static `(external, column)` table.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Translate an external field name to its column name.
    ///
    /// Total: unmapped names are returned verbatim. Tables are small enough
    /// that a linear scan beats hashing.
    pub fn translate<'a>(&self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(external, _)| *external == field)
            .map(|(_, column)| *column)
            .unwrap_or(field)
    }
}

/// Render a column name as a quoted SQL identifier, escaping `"` as `""`.
///
/// Column names come from trusted `AttributeMap` tables, but quoting keeps
/// camelCase fallthrough names (and reserved words) valid.
pub(crate) fn quoted(column: &str) -> String {
    let mut out = String::with_capacity(column.len() + 2);
    out.push('"');
    for ch in column.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
    out
}
