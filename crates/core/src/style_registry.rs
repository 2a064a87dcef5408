//! Style directives. All directives touching a location accumulate; a later
//! directive only overrides the properties it sets itself.

use crate::color_scale::PreparedScale;
use crate::error::TableError;
use crate::selection::{ColumnSelector, RowSelector, Selection};
use std::sync::Arc;
use tablekit_style::CellStyle;
use tablekit_types::Value;

/// Where a style applies, before it is resolved against the table.
#[derive(Debug, Clone)]
pub enum Location {
    Body { columns: ColumnSelector, rows: RowSelector },
    ColumnLabels { columns: ColumnSelector },
    Stub { rows: RowSelector },
    /// The label above the stub column.
    Stubhead,
    /// `None` targets every row group.
    RowGroups { groups: Option<Vec<String>> },
    Title,
    Subtitle,
    SourceNotes,
    Spanners { ids: Vec<String> },
}

impl Location {
    pub fn body(columns: impl Into<ColumnSelector>, rows: impl Into<RowSelector>) -> Self {
        Location::Body { columns: columns.into(), rows: rows.into() }
    }

    pub fn column_labels(columns: impl Into<ColumnSelector>) -> Self {
        Location::ColumnLabels { columns: columns.into() }
    }

    pub fn stub(rows: impl Into<RowSelector>) -> Self {
        Location::Stub { rows: rows.into() }
    }

    pub fn row_groups() -> Self {
        Location::RowGroups { groups: None }
    }

    pub fn row_group<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Location::RowGroups { groups: Some(groups.into_iter().map(Into::into).collect()) }
    }

    pub fn spanners<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Location::Spanners { ids: ids.into_iter().map(Into::into).collect() }
    }
}

/// A resolved location.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Body(Selection),
    ColumnLabels(Vec<usize>),
    Stub(Vec<usize>),
    Stubhead,
    RowGroups(Option<Vec<String>>),
    Title,
    Subtitle,
    SourceNotes,
    Spanners(Vec<String>),
}

impl Target {
    pub fn covers_cell(&self, row: usize, column: usize) -> bool {
        matches!(self, Target::Body(sel) if sel.contains(row, column))
    }

    pub fn covers_label(&self, column: usize) -> bool {
        matches!(self, Target::ColumnLabels(cols) if cols.binary_search(&column).is_ok())
    }

    pub fn covers_stub(&self, row: usize) -> bool {
        matches!(self, Target::Stub(rows) if rows.binary_search(&row).is_ok())
    }

    pub fn covers_group(&self, group: &str) -> bool {
        match self {
            Target::RowGroups(None) => true,
            Target::RowGroups(Some(groups)) => groups.iter().any(|g| g == group),
            _ => false,
        }
    }

    pub fn covers_spanner(&self, id: &str) -> bool {
        matches!(self, Target::Spanners(ids) if ids.iter().any(|i| i == id))
    }
}

/// Where a directive's style comes from.
#[derive(Debug, Clone)]
pub enum StyleSource {
    Static(CellStyle),
    /// Computed per cell from its raw value (`data_color`).
    Scale(Arc<PreparedScale>),
}

impl StyleSource {
    pub fn style_for(&self, value: &Value) -> Result<CellStyle, TableError> {
        match self {
            StyleSource::Static(style) => Ok(style.clone()),
            StyleSource::Scale(scale) => scale.style_for(value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StyleDirective {
    pub target: Target,
    pub source: StyleSource,
}

#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    directives: Vec<StyleDirective>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, target: Target, source: StyleSource) {
        log::debug!("Registering style directive #{} on {}", self.directives.len(), target_kind(&target));
        self.directives.push(StyleDirective { target, source });
    }

    pub fn directives(&self) -> &[StyleDirective] {
        &self.directives
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Merged style of a body cell, folding directives in insertion order.
    pub fn body_style(&self, row: usize, column: usize, value: &Value) -> Result<CellStyle, TableError> {
        self.directives
            .iter()
            .filter(|d| d.target.covers_cell(row, column))
            .try_fold(CellStyle::default(), |acc, d| -> Result<CellStyle, TableError> {
                Ok(acc.merge(&d.source.style_for(value)?))
            })
    }

    /// Merged style of a non-body location. Scale sources are body-only and
    /// skipped here.
    pub fn style_where(&self, covers: impl Fn(&Target) -> bool) -> CellStyle {
        self.directives
            .iter()
            .filter(|d| covers(&d.target))
            .filter_map(|d| match &d.source {
                StyleSource::Static(style) => Some(style),
                StyleSource::Scale(_) => None,
            })
            .fold(CellStyle::default(), |acc, style| acc.merge(style))
    }
}

fn target_kind(target: &Target) -> &'static str {
    match target {
        Target::Body(_) => "body",
        Target::ColumnLabels(_) => "column labels",
        Target::Stub(_) => "stub",
        Target::Stubhead => "stubhead",
        Target::RowGroups(_) => "row groups",
        Target::Title => "title",
        Target::Subtitle => "subtitle",
        Target::SourceNotes => "source notes",
        Target::Spanners(_) => "spanners",
    }
}
