use crate::error::{BoardError, BoardResult};
use std::fmt::Write as _;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A bound query value.
///
/// Arc-wrapped so fragments stay cheap to clone and values of mixed types
/// can share one list.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any bindable value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the inner value as a `tokio-postgres` parameter.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&"<dyn ToSql>").finish()
    }
}

/// One piece of a fragment: literal SQL text, or a slot for the next value.
#[derive(Clone, Debug)]
enum Part {
    Raw(String),
    Slot,
}

/// A parameterized query fragment: SQL text plus the values bound to its
/// placeholders.
///
/// Text pieces and values are stored separately; `$n` ordinals only exist
/// once [`to_sql`](Fragment::to_sql) renders the text. Every slot is
/// numbered by its position at render time, so ordinals are always
/// contiguous and in value order no matter how fragments were composed or
/// spliced. There is no offset bookkeeping to get wrong.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Fragment {
    parts: Vec<Part>,
    params: Vec<Param>,
}

impl Fragment {
    /// Create an empty fragment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a fragment from an initial piece of SQL text.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Raw(sql.into())],
            params: Vec::new(),
        }
    }

    /// Append SQL text (no values).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }
        match self.parts.last_mut() {
            Some(Part::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(Part::Raw(sql.to_string())),
        }
        self
    }

    /// Append a placeholder slot and bind its value.
    ///
    /// Binding an `Option` that is `None` binds SQL `NULL`.
    pub fn push_bind<T>(&mut self, value: T) -> &mut Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.push_param(Param::new(value))
    }

    /// Append a placeholder slot for an already-wrapped value.
    pub fn push_param(&mut self, param: Param) -> &mut Self {
        self.parts.push(Part::Slot);
        self.params.push(param);
        self
    }

    /// Append another fragment, consuming it. Its values keep their relative
    /// order after this fragment's own.
    pub fn push_fragment(&mut self, mut other: Fragment) -> &mut Self {
        self.parts.append(&mut other.parts);
        self.params.append(&mut other.params);
        self
    }

    /// Number of bound values.
    pub fn params_len(&self) -> usize {
        self.params.len()
    }

    /// Whether the fragment holds no text and no values.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.params.is_empty()
    }

    /// Render with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        self.to_sql_from(1)
    }

    /// Render with placeholders starting at `$base`.
    ///
    /// For fragments embedded by hand after `base - 1` fixed leading
    /// parameters; [`assemble`] makes this unnecessary for the common case.
    pub fn to_sql_from(&self, base: usize) -> String {
        let mut out = String::with_capacity(self.parts.iter().fold(0, |acc, p| match p {
            Part::Raw(s) => acc + s.len(),
            Part::Slot => acc + 3,
        }));
        let mut next = base;
        for part in &self.parts {
            match part {
                Part::Raw(s) => out.push_str(s),
                Part::Slot => {
                    let _ = write!(out, "${next}");
                    next += 1;
                }
            }
        }
        out
    }

    /// Value refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(Param::as_ref).collect()
    }

    /// Check the slot-count/value-count invariant.
    ///
    /// Composition keeps the two in lockstep, so a mismatch means a bug in
    /// this module rather than bad input.
    pub fn validate(&self) -> BoardResult<()> {
        let slots = self
            .parts
            .iter()
            .filter(|p| matches!(p, Part::Slot))
            .count();
        if slots != self.params.len() {
            let params = self.params.len();
            return Err(BoardError::validation(format!(
                "Fragment: placeholders({slots}) != params({params})"
            )));
        }
        Ok(())
    }
}

/// Splice a compiled fragment into a query template.
///
/// `template` is trusted, internally-supplied SQL containing exactly one
/// `{}` where `fragment` is inserted and one `?` per value in `extra`
/// (renumbered to `$n` at render, in template order). A `None` fragment,
/// the predicate builder's "nothing to filter on" sentinel, renders as the
/// constant `TRUE`, keeping templates with a mandatory `WHERE` valid.
///
/// The result renders with contiguous ordinals from `$1` and
/// `len(values) == highest ordinal`, for any combination of template,
/// fragment, and extra values. Marker/value mismatches are [`Validation`]
/// errors: they indicate a broken template, never bad request data.
///
/// [`Validation`]: crate::BoardError::Validation
pub fn assemble(
    template: &str,
    fragment: Option<Fragment>,
    extra: impl IntoIterator<Item = Param>,
) -> BoardResult<Fragment> {
    let mut out = Fragment::empty();
    let mut fragment = Some(fragment);
    let mut extra = extra.into_iter();

    let mut rest = template;
    while let Some(pos) = rest.find(['{', '?']) {
        out.push(&rest[..pos]);
        if rest.as_bytes()[pos] == b'?' {
            let value = extra.next().ok_or_else(|| {
                BoardError::validation("assemble: more ? markers than extra values")
            })?;
            out.push_param(value);
            rest = &rest[pos + 1..];
        } else {
            if !rest[pos..].starts_with("{}") {
                return Err(BoardError::validation("assemble: stray '{' in template"));
            }
            match fragment.take() {
                Some(Some(inner)) => {
                    out.push_fragment(inner);
                }
                Some(None) => {
                    out.push("TRUE");
                }
                None => {
                    return Err(BoardError::validation(
                        "assemble: template has more than one {} slot",
                    ));
                }
            }
            rest = &rest[pos + 2..];
        }
    }
    out.push(rest);

    if fragment.is_some() {
        return Err(BoardError::validation("assemble: template has no {} slot"));
    }
    if extra.next().is_some() {
        return Err(BoardError::validation(
            "assemble: more extra values than ? markers",
        ));
    }
    out.validate()?;
    Ok(out)
}
