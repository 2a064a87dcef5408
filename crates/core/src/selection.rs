//! Column and row selectors and their resolution to concrete cell coordinates.
//!
//! Selectors are tagged variants: either an explicit set (names, indices) or
//! a pure predicate. Resolution happens when a directive is registered, so a
//! bad column reference fails at the call that introduced it.

use crate::data::TableData;
use crate::error::SelectionError;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tablekit_types::Value;

type ColumnPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;
type RowPredicate = Arc<dyn Fn(&RowView<'_>) -> bool + Send + Sync>;
type ValuePredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Read-only view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    index: usize,
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> RowView<'a> {
    pub(crate) fn new(index: usize, columns: &'a [String], values: &'a [Value]) -> Self {
        Self { index, columns, values }
    }

    /// Position of the row in the input data.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns.iter().position(|c| c == column).map(|i| &self.values[i])
    }

    pub fn f64(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }

    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.get(column).and_then(Value::as_str)
    }
}

#[derive(Clone)]
pub enum ColumnSelector {
    All,
    Names(Vec<String>),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    Matches(Regex),
    Where(ColumnPredicate),
}

impl ColumnSelector {
    pub fn name(name: impl Into<String>) -> Self {
        ColumnSelector::Names(vec![name.into()])
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSelector::Names(names.into_iter().map(Into::into).collect())
    }

    pub fn starts_with(prefix: impl Into<String>) -> Self {
        ColumnSelector::StartsWith(prefix.into())
    }

    pub fn ends_with(suffix: impl Into<String>) -> Self {
        ColumnSelector::EndsWith(suffix.into())
    }

    pub fn contains(fragment: impl Into<String>) -> Self {
        ColumnSelector::Contains(fragment.into())
    }

    /// Columns whose name matches a regular expression.
    pub fn matches(pattern: &str) -> Result<Self, SelectionError> {
        Regex::new(pattern)
            .map(ColumnSelector::Matches)
            .map_err(|e| SelectionError::InvalidPattern(e.to_string()))
    }

    pub fn where_name<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        ColumnSelector::Where(Arc::new(predicate))
    }

    /// Resolves to column indices in table order. Explicit names must exist;
    /// pattern selectors may legitimately match nothing.
    pub fn resolve(&self, data: &TableData) -> Result<Vec<usize>, SelectionError> {
        let columns = data.columns();
        let pick = |keep: &dyn Fn(&str) -> bool| -> Vec<usize> {
            columns
                .iter()
                .enumerate()
                .filter(|(_, name)| keep(name))
                .map(|(i, _)| i)
                .collect()
        };
        let resolved = match self {
            ColumnSelector::All => (0..columns.len()).collect(),
            ColumnSelector::Names(names) => {
                let mut indices = names
                    .iter()
                    .map(|name| {
                        data.column_index(name)
                            .ok_or_else(|| SelectionError::UnknownColumn(name.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                indices.sort_unstable();
                indices.dedup();
                indices
            }
            ColumnSelector::StartsWith(prefix) => pick(&|name| name.starts_with(prefix.as_str())),
            ColumnSelector::EndsWith(suffix) => pick(&|name| name.ends_with(suffix.as_str())),
            ColumnSelector::Contains(fragment) => pick(&|name| name.contains(fragment.as_str())),
            ColumnSelector::Matches(regex) => pick(&|name| regex.is_match(name)),
            ColumnSelector::Where(predicate) => pick(&|name| predicate(name)),
        };
        Ok(resolved)
    }
}

impl fmt::Debug for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::All => f.write_str("All"),
            ColumnSelector::Names(names) => f.debug_tuple("Names").field(names).finish(),
            ColumnSelector::StartsWith(s) => f.debug_tuple("StartsWith").field(s).finish(),
            ColumnSelector::EndsWith(s) => f.debug_tuple("EndsWith").field(s).finish(),
            ColumnSelector::Contains(s) => f.debug_tuple("Contains").field(s).finish(),
            ColumnSelector::Matches(r) => f.debug_tuple("Matches").field(&r.as_str()).finish(),
            ColumnSelector::Where(_) => f.write_str("Where(<predicate>)"),
        }
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::name(name)
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::name(name)
    }
}

impl From<Vec<&str>> for ColumnSelector {
    fn from(names: Vec<&str>) -> Self {
        ColumnSelector::names(names)
    }
}

impl From<Vec<String>> for ColumnSelector {
    fn from(names: Vec<String>) -> Self {
        ColumnSelector::Names(names)
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSelector {
    fn from(names: [&str; N]) -> Self {
        ColumnSelector::names(names)
    }
}

#[derive(Clone, Default)]
pub enum RowSelector {
    #[default]
    All,
    Indices(Vec<usize>),
    /// Predicate over the whole row.
    Where(RowPredicate),
    /// Predicate over a single named column's value.
    ColumnWhere { column: String, predicate: ValuePredicate },
}

impl RowSelector {
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Self {
        RowSelector::Indices(indices.into_iter().collect())
    }

    pub fn where_row<F>(predicate: F) -> Self
    where
        F: Fn(&RowView<'_>) -> bool + Send + Sync + 'static,
    {
        RowSelector::Where(Arc::new(predicate))
    }

    pub fn column_where<F>(column: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        RowSelector::ColumnWhere { column: column.into(), predicate: Arc::new(predicate) }
    }

    /// Resolves to sorted row indices. Predicates see raw, unformatted values.
    pub fn resolve(&self, data: &TableData) -> Result<Vec<usize>, SelectionError> {
        let n_rows = data.n_rows();
        let resolved = match self {
            RowSelector::All => (0..n_rows).collect(),
            RowSelector::Indices(indices) => {
                if let Some(&index) = indices.iter().find(|&&i| i >= n_rows) {
                    return Err(SelectionError::RowOutOfRange { index, n_rows });
                }
                let mut sorted = indices.clone();
                sorted.sort_unstable();
                sorted.dedup();
                sorted
            }
            RowSelector::Where(predicate) => (0..n_rows).filter(|&i| predicate(&data.row_view(i))).collect(),
            RowSelector::ColumnWhere { column, predicate } => {
                let col = data
                    .column_index(column)
                    .ok_or_else(|| SelectionError::UnknownColumn(column.clone()))?;
                (0..n_rows).filter(|&i| predicate(data.value(i, col))).collect()
            }
        };
        Ok(resolved)
    }
}

impl fmt::Debug for RowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSelector::All => f.write_str("All"),
            RowSelector::Indices(indices) => f.debug_tuple("Indices").field(indices).finish(),
            RowSelector::Where(_) => f.write_str("Where(<predicate>)"),
            RowSelector::ColumnWhere { column, .. } => {
                f.debug_struct("ColumnWhere").field("column", column).finish_non_exhaustive()
            }
        }
    }
}

impl From<usize> for RowSelector {
    fn from(index: usize) -> Self {
        RowSelector::Indices(vec![index])
    }
}

impl From<Vec<usize>> for RowSelector {
    fn from(indices: Vec<usize>) -> Self {
        RowSelector::Indices(indices)
    }
}

/// A resolved rectangular selection: every listed row crossed with every
/// listed column. Both lists are sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    rows: Vec<usize>,
    columns: Vec<usize>,
}

impl Selection {
    pub fn resolve(
        data: &TableData,
        columns: &ColumnSelector,
        rows: &RowSelector,
    ) -> Result<Self, SelectionError> {
        Ok(Self {
            columns: columns.resolve(data)?,
            rows: rows.resolve(data)?,
        })
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.rows.binary_search(&row).is_ok() && self.columns.binary_search(&column).is_ok()
    }

    pub fn contains_column(&self, column: usize) -> bool {
        self.columns.binary_search(&column).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .flat_map(move |&r| self.columns.iter().map(move |&c| (r, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableData {
        TableData::new(
            vec!["name", "price_open", "price_close", "volume"],
            vec![
                vec!["a".into(), 1.0.into(), 2.0.into(), 10.into()],
                vec!["b".into(), 3.0.into(), 1.0.into(), 20.into()],
                vec!["c".into(), Value::Null, 5.0.into(), 30.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_named_columns_must_exist() {
        let data = sample();
        assert_eq!(ColumnSelector::from(["volume", "name"]).resolve(&data).unwrap(), vec![0, 3]);
        assert_eq!(
            ColumnSelector::from("nope").resolve(&data),
            Err(SelectionError::UnknownColumn("nope".to_string()))
        );
    }

    #[test]
    fn test_pattern_selectors() {
        let data = sample();
        assert_eq!(ColumnSelector::starts_with("price_").resolve(&data).unwrap(), vec![1, 2]);
        assert_eq!(ColumnSelector::ends_with("close").resolve(&data).unwrap(), vec![2]);
        assert_eq!(ColumnSelector::matches("^(name|volume)$").unwrap().resolve(&data).unwrap(), vec![0, 3]);
        assert!(ColumnSelector::starts_with("zzz").resolve(&data).unwrap().is_empty());
        assert!(matches!(ColumnSelector::matches("("), Err(SelectionError::InvalidPattern(_))));
    }

    #[test]
    fn test_row_predicates_see_raw_values() {
        let data = sample();
        let rising = RowSelector::where_row(|row| {
            matches!((row.f64("price_open"), row.f64("price_close")), (Some(o), Some(c)) if c > o)
        });
        assert_eq!(rising.resolve(&data).unwrap(), vec![0]);

        let big = RowSelector::column_where("volume", |v| v.as_f64().is_some_and(|x| x >= 20.0));
        assert_eq!(big.resolve(&data).unwrap(), vec![1, 2]);

        let none = RowSelector::column_where("volume", |v| v.as_f64().is_some_and(|x| x > 1e9));
        assert!(none.resolve(&data).unwrap().is_empty());

        let bad = RowSelector::column_where("missing", |_| true);
        assert_eq!(bad.resolve(&data), Err(SelectionError::UnknownColumn("missing".to_string())));
    }

    #[test]
    fn test_row_indices_bounds() {
        let data = sample();
        assert_eq!(RowSelector::indices([2, 0, 2]).resolve(&data).unwrap(), vec![0, 2]);
        assert_eq!(
            RowSelector::from(3).resolve(&data),
            Err(SelectionError::RowOutOfRange { index: 3, n_rows: 3 })
        );
    }

    #[test]
    fn test_selection_contains() {
        let data = sample();
        let sel = Selection::resolve(&data, &ColumnSelector::starts_with("price"), &RowSelector::from(vec![0, 2])).unwrap();
        assert!(sel.contains(2, 1));
        assert!(!sel.contains(1, 1));
        assert!(!sel.contains(0, 3));
        assert_eq!(sel.cell_count(), 4);
        assert_eq!(sel.cells().collect::<Vec<_>>(), vec![(0, 1), (0, 2), (2, 1), (2, 2)]);
    }
}
