//! Ordered formatting directives. The last directive covering a cell wins.

use crate::selection::Selection;
use tablekit_format::Formatter;

#[derive(Debug, Clone)]
pub struct FormatDirective {
    pub selection: Selection,
    pub formatter: Formatter,
}

/// Replacement text for missing values (`sub_missing`).
#[derive(Debug, Clone, PartialEq)]
pub struct MissingTextDirective {
    pub selection: Selection,
    pub text: String,
}

/// Directives are only ever appended; lookups walk the list backwards so the
/// most recent directive covering a cell is found first.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: Vec<FormatDirective>,
    missing: Vec<MissingTextDirective>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, selection: Selection, formatter: Formatter) {
        log::debug!(
            "Registering '{}' formatter #{} over {} cell(s)",
            formatter.name(),
            self.formats.len(),
            selection.cell_count()
        );
        self.formats.push(FormatDirective { selection, formatter });
    }

    pub fn apply_missing_text(&mut self, selection: Selection, text: String) {
        log::debug!("Registering missing-value text {:?} over {} cell(s)", text, selection.cell_count());
        self.missing.push(MissingTextDirective { selection, text });
    }

    pub fn formatter_for(&self, row: usize, column: usize) -> Option<&Formatter> {
        self.formats
            .iter()
            .rev()
            .find(|d| d.selection.contains(row, column))
            .map(|d| &d.formatter)
    }

    pub fn missing_text_for(&self, row: usize, column: usize) -> Option<&str> {
        self.missing
            .iter()
            .rev()
            .find(|d| d.selection.contains(row, column))
            .map(|d| d.text.as_str())
    }

    pub fn directives(&self) -> &[FormatDirective] {
        &self.formats
    }

    pub fn missing_directives(&self) -> &[MissingTextDirective] {
        &self.missing
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty() && self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TableData;
    use crate::selection::{ColumnSelector, RowSelector};
    use std::sync::Arc;
    use tablekit_format::{FnFormatter, Value};

    fn data() -> TableData {
        TableData::new(
            vec!["x", "y"],
            vec![vec![1.into(), 2.into()], vec![3.into(), 4.into()]],
        )
        .unwrap()
    }

    fn constant(text: &'static str) -> Formatter {
        Arc::new(FnFormatter::infallible(move |_| text.to_string()))
    }

    #[test]
    fn test_last_directive_wins_per_cell() {
        let data = data();
        let mut registry = FormatRegistry::new();
        let all = Selection::resolve(&data, &ColumnSelector::All, &RowSelector::All).unwrap();
        let corner = Selection::resolve(&data, &"y".into(), &RowSelector::from(1)).unwrap();
        registry.apply(all, constant("first"));
        registry.apply(corner, constant("second"));

        let at = |r, c| registry.formatter_for(r, c).unwrap().format(&Value::Null).unwrap();
        assert_eq!(at(0, 0), "first");
        assert_eq!(at(0, 1), "first");
        assert_eq!(at(1, 1), "second");
    }

    #[test]
    fn test_uncovered_cells_have_no_formatter() {
        let data = data();
        let mut registry = FormatRegistry::new();
        let empty = Selection::resolve(&data, &"x".into(), &RowSelector::column_where("x", |_| false)).unwrap();
        registry.apply(empty, constant("never"));
        assert!(registry.formatter_for(0, 0).is_none());
        assert!(registry.missing_text_for(0, 0).is_none());
    }
}
